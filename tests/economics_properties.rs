//! Property tests for the invariants of the economics pipeline.

use proptest::prelude::*;
use rust_decimal::Decimal;

use tender_economics::domain::analysis::{EconomicsOrchestrator, Scenario, ScenarioDelta, ScenarioEngine};
use tender_economics::domain::economics::ProjectConfig;
use tender_economics::domain::foundation::{Money, ProjectType, RiskLevel};

/// (allocation in hundredths, rate, hours)
type RoleInput = (i64, i64, i64);

fn role_strategy() -> impl Strategy<Value = RoleInput> {
    (1i64..=100, 0i64..=5_000, 0i64..=500)
}

fn build_config(
    contract: i64,
    duration: u32,
    roles: &[RoleInput],
    overheads: &[i64],
    taxes: &[i64],
) -> ProjectConfig {
    let mut builder = ProjectConfig::builder()
        .project_name("Property project")
        .total_amount(Money::from_units(contract))
        .duration_months(duration)
        .project_type(ProjectType::Engineering);
    for (i, (allocation, rate, hours)) in roles.iter().enumerate() {
        builder = builder.role(
            format!("Role {}", i),
            Decimal::new(*allocation, 2),
            Money::from_units(*rate),
            Decimal::from(*hours),
        );
    }
    for (i, amount) in overheads.iter().enumerate() {
        builder = builder.overhead(format!("Item {}", i), Money::from_units(*amount));
    }
    for (i, rate) in taxes.iter().enumerate() {
        builder = builder.tax(format!("Tax {}", i), Decimal::new(*rate, 2));
    }
    builder.build().unwrap()
}

proptest! {
    #[test]
    fn calculation_is_deterministic(
        contract in 1i64..10_000_000,
        duration in 1u32..36,
        roles in prop::collection::vec(role_strategy(), 0..6),
        overheads in prop::collection::vec(0i64..500_000, 0..4),
        taxes in prop::collection::vec(0i64..100, 0..3),
    ) {
        let config = build_config(contract, duration, &roles, &overheads, &taxes);
        let orchestrator = EconomicsOrchestrator::default();
        let first = orchestrator.calculate(Money::from_units(contract), config.clone()).unwrap();
        let second = orchestrator.calculate(Money::from_units(contract), config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn costs_and_taxes_are_never_negative(
        contract in 1i64..10_000_000,
        roles in prop::collection::vec(role_strategy(), 0..6),
        overheads in prop::collection::vec(0i64..500_000, 0..4),
        taxes in prop::collection::vec(0i64..100, 0..3),
    ) {
        let config = build_config(contract, 6, &roles, &overheads, &taxes);
        let result = EconomicsOrchestrator::default()
            .calculate(Money::from_units(contract), config)
            .unwrap();

        prop_assert!(!result.labor_cost().is_negative());
        prop_assert!(!result.overhead_cost().is_negative());
        prop_assert!(!result.total_tax().is_negative());
        prop_assert!(result.labor_breakdown().values().all(|c| !c.is_negative()));
        prop_assert!(result.taxes().iter().all(|t| !t.amount.is_negative()));
        prop_assert_eq!(result.gross_cost(), result.labor_cost() + result.overhead_cost());
        prop_assert_eq!(result.net_profit(), result.pre_tax_profit() - result.total_tax());
    }

    #[test]
    fn losses_owe_no_tax(
        contract in 1i64..100_000,
        overhead in 100_000i64..1_000_000,
        taxes in prop::collection::vec(0i64..100, 1..3),
    ) {
        let config = build_config(contract, 6, &[], &[overhead], &taxes);
        let result = EconomicsOrchestrator::default()
            .calculate(Money::from_units(contract), config)
            .unwrap();

        prop_assert!(!result.pre_tax_profit().is_positive());
        prop_assert_eq!(result.tax_base(), Money::ZERO);
        prop_assert_eq!(result.total_tax(), Money::ZERO);
        prop_assert_eq!(result.net_profit(), result.pre_tax_profit());
    }

    #[test]
    fn tax_never_exceeds_base(
        contract in 1i64..10_000_000,
        overhead in 0i64..1_000_000,
        taxes in prop::collection::vec(0i64..100, 0..4),
    ) {
        let config = build_config(contract, 6, &[], &[overhead], &taxes);
        let result = EconomicsOrchestrator::default()
            .calculate(Money::from_units(contract), config)
            .unwrap();
        prop_assert!(result.total_tax() <= result.tax_base());
    }

    #[test]
    fn lower_revenue_never_lowers_risk(
        contract in 100_000i64..10_000_000,
        duration in 1u32..36,
        roles in prop::collection::vec(role_strategy(), 1..5),
        cut in 1i64..100,
    ) {
        let config = build_config(contract, duration, &roles, &[], &[20]);
        let engine = ScenarioEngine::default();
        let base = engine.run_scenario(&config, Money::from_units(contract), &Scenario::new("base")).unwrap();
        let reduced = engine
            .run_scenario(
                &config,
                Money::from_units(contract),
                &Scenario::new("reduced").with(ScenarioDelta::RevenueMultiplier {
                    factor: Decimal::new(cut, 2),
                }),
            )
            .unwrap();

        prop_assert!(reduced.profit_margin() <= base.profit_margin());
        prop_assert!(reduced.risk_level() >= base.risk_level());
        prop_assert!(reduced.risk_level() <= RiskLevel::Critical);
    }
}
