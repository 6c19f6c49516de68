use inventory_pooling::{
    run, CentralizedConfig, CostModel, PoolingVerdict, RegionConfig, RopPolicy, ScenarioConfig,
    ScenarioRunner, SimError, SiteParameters, StockSnapshot,
};

fn deterministic(mean_demand: f64, mean_lead_time: f64, initial_stock: u64) -> SiteParameters {
    SiteParameters {
        mean_demand,
        demand_std: 0.0,
        mean_lead_time,
        lead_time_std: 0.0,
        freight_cost_per_unit: 2.5,
        initial_stock,
        safety_factor: 0.0,
    }
}

fn single_region(params: SiteParameters, horizon_days: u32) -> ScenarioConfig {
    ScenarioConfig {
        horizon_days,
        seed: Some(1),
        rop_policy: RopPolicy::Simple,
        costs: CostModel::default(),
        regions: vec![RegionConfig::new("Solo", params)],
        centralized: CentralizedConfig::default(),
    }
}

#[test]
fn empty_site_on_a_one_day_horizon() {
    let config = single_region(deterministic(5.0, 3.0, 0), 1);
    let result = run(&config).unwrap();
    let site = &result.decentralized[0];

    assert_eq!(site.lost_sales_total, 5.0);
    assert_eq!(site.final_stock, 0);
    assert_eq!(site.stock_history, vec![StockSnapshot { day: 0, stock: 0 }]);
    assert_eq!(site.orders_placed, 1);
    assert!(site.order_in_transit_at_end);
    assert_eq!(site.cost_total, 100.0);
}

#[test]
fn three_day_lead_time_arrival() {
    let config = single_region(deterministic(5.0, 3.0, 0), 6);
    let result = run(&config).unwrap();
    let site = &result.decentralized[0];

    let in_transit: Vec<bool> = site.ledger.iter().map(|r| r.order_in_transit).collect();
    assert_eq!(in_transit, vec![true, true, true, false, false, false]);

    let stock: Vec<u64> = site.stock_history.iter().map(|s| s.stock).collect();
    assert_eq!(stock, vec![0, 0, 0, 300, 295, 290]);
    assert_eq!(site.orders_received, 1);
    assert_eq!(site.lost_sales_total, 15.0);
}

#[test]
fn same_seed_gives_identical_runs() {
    let mut config = ScenarioConfig::three_region(30.0, 4.0, 2.0);
    config.seed = Some(2024);

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_eq!(first, second);

    for (a, b) in first.sites().zip(second.sites()) {
        assert_eq!(a.stock_history, b.stock_history);
        assert_eq!(a.cost_total.to_bits(), b.cost_total.to_bits());
        assert_eq!(a.lost_sales_total.to_bits(), b.lost_sales_total.to_bits());
    }
}

#[test]
fn unseeded_run_reports_its_seed() {
    let mut config = ScenarioConfig::three_region(15.0, 4.0, 1.0);
    config.horizon_days = 30;
    let first = run(&config).unwrap();

    config.seed = Some(first.seed);
    let replay = run(&config).unwrap();
    assert_eq!(first.totals, replay.totals);
}

#[test]
fn totals_aggregate_the_sites() {
    let mut config = ScenarioConfig::three_region(15.0, 4.0, 1.0);
    config.seed = Some(5);
    let result = ScenarioRunner::new(config).unwrap().run().unwrap();

    let cost: f64 = result.decentralized.iter().map(|s| s.cost_total).sum();
    let lost: f64 = result.decentralized.iter().map(|s| s.lost_sales_total).sum();
    assert_eq!(result.totals.total_cost_decentralized, cost);
    assert_eq!(result.totals.total_lost_sales_decentralized, lost);
    assert_eq!(result.totals.total_cost_centralized, result.centralized.cost_total);
    assert_eq!(
        result.totals.total_lost_sales_centralized,
        result.centralized.lost_sales_total
    );
    assert_eq!(result.verdict, result.totals.verdict());
}

#[test]
fn pooled_site_uses_risk_pooling() {
    let mut config = ScenarioConfig::three_region(20.0, 4.0, 1.0);
    config.seed = Some(9);
    config.horizon_days = 5;
    let result = run(&config).unwrap();

    let stds: Vec<f64> = config.regions.iter().map(|r| r.params.demand_std).collect();
    let expected = (stds[0].powi(2) + stds[1].powi(2) + stds[2].powi(2)).sqrt();
    assert!((result.centralized.params.demand_std - expected).abs() < 1e-12);
    assert!((result.centralized.params.mean_demand - 10.4).abs() < 1e-12);
}

#[test]
fn configuration_is_not_mutated() {
    let mut config = ScenarioConfig::three_region(15.0, 4.0, 1.0);
    config.seed = Some(8);
    let before = config.clone();
    run(&config).unwrap();
    assert_eq!(config, before);
}

#[test]
fn invalid_configuration_fails_before_running() {
    let mut config = single_region(deterministic(5.0, 3.0, 0), 0);
    assert!(matches!(
        run(&config),
        Err(SimError::InvalidParameter { ref field, .. }) if field == "horizon_days"
    ));

    config.horizon_days = 10;
    config.regions[0].params.mean_lead_time = 0.0;
    assert!(matches!(run(&config), Err(SimError::InvalidParameter { .. })));

    config.regions[0].params.mean_lead_time = 3.0;
    config.regions[0].params.lead_time_std = -0.5;
    assert!(matches!(run(&config), Err(SimError::InvalidParameter { .. })));

    config.regions.clear();
    assert!(run(&config).is_err());
}

#[test]
fn well_stocked_pool_beats_starved_regions() {
    let regions = vec![
        RegionConfig::new("A", deterministic(5.0, 10.0, 0)),
        RegionConfig::new("B", deterministic(5.0, 10.0, 0)),
    ];
    let config = ScenarioConfig {
        horizon_days: 5,
        seed: Some(1),
        rop_policy: RopPolicy::CombinedVariance,
        costs: CostModel::default(),
        regions,
        centralized: CentralizedConfig {
            initial_stock: Some(1000),
            ..CentralizedConfig::default()
        },
    };
    let result = run(&config).unwrap();

    assert_eq!(result.totals.total_lost_sales_decentralized, 50.0);
    assert_eq!(result.totals.total_lost_sales_centralized, 0.0);
    assert_eq!(
        result.verdict,
        PoolingVerdict::PoolingAvoidedStockouts { units: 50.0 }
    );
}

#[test]
fn bundled_scenario_file_loads_and_runs() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/three_region.toml");
    let config = ScenarioConfig::load(path).unwrap();
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.regions.len(), 3);
    assert_eq!(config.centralized.lead_time_penalty_days, 2.0);

    let result = run(&config).unwrap();
    assert_eq!(result.centralized.params.mean_lead_time, 6.0);
    assert_eq!(result.centralized.params.safety_factor, 1.65);
    assert_eq!(result.centralized.stock_history.len(), 365);
}

#[test]
fn huge_demand_runs_without_overflow() {
    let config = single_region(deterministic(1e19, 3.0, 0), 3);
    let result = run(&config).unwrap();

    for site in result.sites() {
        assert_eq!(site.total_demand, u64::MAX);
        assert_eq!(site.fill_rate, 0.0);
        assert!(site.cost_total.is_finite());
    }
    assert!(result.totals.total_lost_sales_decentralized > 2.9e19);
}
