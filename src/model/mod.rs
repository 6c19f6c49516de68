pub mod replenishment;
pub mod site;
