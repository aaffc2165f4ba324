//! Integration tests for the economics pipeline.
//!
//! These tests drive the public API end to end:
//! 1. Build a project configuration (directly, from YAML or from a template)
//! 2. Run it through the orchestrator
//! 3. Annotate against market benchmarks and re-run what-if scenarios

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use tender_economics::domain::analysis::{
    AnalysisSettings, EconomicsOrchestrator, MarketComparator, MarketStanding, RiskSignalKind,
    Scenario, ScenarioDelta, ScenarioEngine,
};
use tender_economics::domain::economics::{
    ProfitGrade, ProjectConfig, RangePosition, Roi, TaxSchedule, TemplateCatalog,
};
use tender_economics::domain::foundation::{
    EconomicsError, ErrorCode, Money, ProjectType, RiskLevel, Severity, Violation,
};

// =============================================================================
// Fixtures
// =============================================================================

fn library_renovation() -> ProjectConfig {
    ProjectConfig::builder()
        .project_name("Library renovation")
        .total_amount(Money::from_units(5_000_000))
        .duration_months(6)
        .project_type(ProjectType::Architecture)
        .role("GIP", dec!(0.15), Money::from_units(3000), dec!(80))
        .role("Architect", dec!(0.25), Money::from_units(2500), dec!(120))
        .role("Engineer", dec!(0.16), Money::from_units(2000), dec!(100))
        .overhead("office_rent", Money::from_units(300_000))
        .overhead("software", Money::from_units(50_000))
        .tax("income_tax", dec!(0.20))
        .tax("social", dec!(0.30))
        .build()
        .unwrap()
}

const LIBRARY_YAML: &str = r#"
project_name: Library renovation
total_amount: 5000000
duration_months: 6
project_type: architecture
team:
  GIP: { allocation: 0.15, rate: 3000, hours: 80 }
  Architect: { allocation: 0.25, rate: 2500, hours: 120 }
  Engineer: { allocation: 0.16, rate: 2000, hours: 100 }
overhead_costs:
  office_rent: 300000
  software: 50000
taxes:
  - { name: income_tax, rate: 0.20 }
  - { name: social, rate: 0.30 }
"#;

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn profitable_project_end_to_end() {
    let result = EconomicsOrchestrator::default()
        .calculate(Money::from_units(5_000_000), library_renovation())
        .unwrap();

    assert_eq!(result.labor_cost(), Money::from_units(143_000));
    assert_eq!(result.gross_cost(), Money::from_units(493_000));
    assert_eq!(result.pre_tax_profit(), Money::from_units(4_507_000));

    let taxes = result.taxes();
    assert_eq!(taxes.len(), 2);
    assert_eq!(taxes[0].amount, Money::from_units(901_400));
    assert_eq!(taxes[1].base, Money::from_units(3_605_600));
    assert_eq!(taxes[1].amount, Money::from_units(1_081_680));
    assert_eq!(result.net_profit(), Money::from_units(2_523_920));

    assert_eq!(result.profit_margin().value().round_dp(2), dec!(50.48));
    let roi = result.roi().value().unwrap().value();
    assert_eq!(roi.round_dp(2), dec!(511.95));

    assert!(result.is_profitable());
    assert_eq!(result.profit_grade(), ProfitGrade::Excellent);
    assert_eq!(result.risk_level(), RiskLevel::Low);
}

#[test]
fn loss_making_project_end_to_end() {
    let config = ProjectConfig::builder()
        .project_name("Underpriced bid")
        .total_amount(Money::from_units(100_000))
        .duration_months(4)
        .project_type(ProjectType::Engineering)
        .role("Engineer", dec!(0.5), Money::from_units(2000), dec!(100))
        .role("Drafter", dec!(0.5), Money::from_units(1000), dec!(100))
        .overhead("rent", Money::from_units(0))
        .overhead("equipment", Money::from_units(0))
        .tax("income_tax", dec!(0.2))
        .build()
        .unwrap();
    // labor: 100,000 + 50,000 = 150,000

    let result = EconomicsOrchestrator::default()
        .calculate(Money::from_units(100_000), config)
        .unwrap();

    assert_eq!(result.gross_cost(), Money::from_units(150_000));
    assert_eq!(result.tax_base(), Money::ZERO);
    assert_eq!(result.total_tax(), Money::ZERO);
    assert_eq!(result.net_profit(), Money::from_units(-50_000));
    assert_eq!(result.profit_margin().value(), dec!(-50));
    assert_eq!(result.roi().value().unwrap().value().round_dp(2), dec!(-33.33));
    assert!(result.risk_level() >= RiskLevel::High);
    assert_eq!(result.profit_grade(), ProfitGrade::Unprofitable);
}

#[test]
fn zero_cost_project_has_undefined_roi() {
    let config = ProjectConfig::builder()
        .project_name("Pro bono")
        .total_amount(Money::from_units(50_000))
        .duration_months(2)
        .project_type(ProjectType::Restoration)
        .tax("income_tax", dec!(0.2))
        .build()
        .unwrap();

    let result = EconomicsOrchestrator::default()
        .calculate(Money::from_units(50_000), config)
        .unwrap();

    assert_eq!(result.gross_cost(), Money::ZERO);
    assert!(result.net_profit().is_positive());
    assert_eq!(result.roi(), Roi::Undefined);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["roi"]["status"], "undefined");
}

// =============================================================================
// Configuration sources
// =============================================================================

#[test]
fn yaml_configuration_matches_builder() {
    let from_yaml: ProjectConfig = serde_yaml::from_str(LIBRARY_YAML).unwrap();
    assert_eq!(from_yaml, library_renovation());
}

#[test]
fn yaml_tax_mapping_uses_name_order() {
    let yaml = LIBRARY_YAML.replace(
        "  - { name: income_tax, rate: 0.20 }\n  - { name: social, rate: 0.30 }",
        "  social: 0.30\n  income_tax: 0.20",
    );
    let config: ProjectConfig = serde_yaml::from_str(&yaml).unwrap();
    let names: Vec<_> = config.taxes().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["income_tax", "social"]);
}

#[test]
fn invalid_yaml_configuration_is_rejected() {
    let yaml = LIBRARY_YAML.replace("duration_months: 6", "duration_months: 0");
    assert!(serde_yaml::from_str::<ProjectConfig>(&yaml).is_err());
}

#[test]
fn builder_reports_every_violation() {
    let err = ProjectConfig::builder()
        .project_name("")
        .total_amount(Money::from_units(-1))
        .duration_months(3)
        .project_type(ProjectType::Complex)
        .role("A", dec!(1.5), Money::from_units(-10), dec!(10))
        .overhead("rent", Money::from_units(-5))
        .tax("vat", dec!(1))
        .build()
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert!(err.violations().len() >= 6);
    assert!(err
        .violations()
        .iter()
        .all(|v| v.severity() == Severity::Error));
}

#[test]
fn template_roles_yield_to_explicit_roles() {
    let catalog = TemplateCatalog::standard();
    let template = catalog.get("small_project").unwrap();

    let config = ProjectConfig::builder()
        .project_name("Kiosk")
        .total_amount(Money::from_units(800_000))
        .duration_months(3)
        .template(template)
        .role("Architect", dec!(0.5), Money::from_units(2000), dec!(40))
        .build()
        .unwrap();

    assert_eq!(config.project_type(), ProjectType::Architecture);
    assert_eq!(config.team().len(), template.roles().len());
    assert_eq!(config.role("Architect").unwrap().allocation(), dec!(0.5));

    let result = EconomicsOrchestrator::default()
        .calculate(Money::from_units(800_000), config)
        .unwrap();
    assert_eq!(result.labor_breakdown().len(), template.roles().len());
}

#[test]
fn unknown_template_is_not_found() {
    let err = TemplateCatalog::standard().get("skyscraper").unwrap_err();
    assert_eq!(err.code(), ErrorCode::TemplateNotFound);
}

#[test]
fn explicit_tax_order_changes_breakdown_not_total() {
    let forward = library_renovation();
    let reversed_schedule =
        TaxSchedule::ordered(vec![("social", dec!(0.30)), ("income_tax", dec!(0.20))]).unwrap();
    let reversed = forward.to_builder().taxes(&reversed_schedule).build().unwrap();

    let orchestrator = EconomicsOrchestrator::default();
    let a = orchestrator.calculate(Money::from_units(5_000_000), forward).unwrap();
    let b = orchestrator.calculate(Money::from_units(5_000_000), reversed).unwrap();

    assert_eq!(a.total_tax(), b.total_tax());
    assert_eq!(b.taxes()[0].name, "social");
    assert_ne!(a.taxes()[0].amount, b.taxes()[0].amount);
}

// =============================================================================
// Risk, market and scenarios
// =============================================================================

#[test]
fn long_concentrated_project_escalates_risk() {
    let config = ProjectConfig::builder()
        .project_name("Ring road")
        .total_amount(Money::from_units(2_000_000))
        .duration_months(24)
        .project_type(ProjectType::Infrastructure)
        .role("Chief Engineer", dec!(0.9), Money::from_units(3000), dec!(400))
        .role("Assistant", dec!(0.1), Money::from_units(1000), dec!(100))
        .build()
        .unwrap();

    let result = EconomicsOrchestrator::default()
        .calculate(Money::from_units(2_000_000), config)
        .unwrap();

    let kinds: Vec<_> = result.risk().signals.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&RiskSignalKind::Duration));
    assert!(kinds.contains(&RiskSignalKind::Concentration));
    // margin is well above 15%, so Low escalated twice
    assert_eq!(result.risk_level(), RiskLevel::High);
}

#[test]
fn tuned_thresholds_change_classification() {
    let mut settings = AnalysisSettings::default();
    settings.risk.low_risk_margin = dec!(60);

    let result = EconomicsOrchestrator::new(settings)
        .calculate(Money::from_units(5_000_000), library_renovation())
        .unwrap();
    assert_eq!(result.risk_level(), RiskLevel::Medium);
}

#[test]
fn market_comparison_against_custom_benchmark() {
    let orchestrator = EconomicsOrchestrator::default();
    let result = orchestrator
        .calculate_and_compare(
            Money::from_units(5_000_000),
            library_renovation(),
            &MarketComparator::standard(),
        )
        .unwrap();

    let comparison = result.market_comparison().unwrap();
    assert_eq!(comparison.project_type, ProjectType::Architecture);
    assert_eq!(comparison.margin_position, RangePosition::Above);
    assert_eq!(comparison.standing, MarketStanding::SignificantlyAbove);
    assert_eq!(comparison.margin_difference.value(), dec!(35.4784));
}

#[test]
fn missing_benchmark_is_reported_as_not_found() {
    let comparator = MarketComparator::new(Default::default());
    let err = EconomicsOrchestrator::default()
        .calculate_and_compare(Money::from_units(5_000_000), library_renovation(), &comparator)
        .unwrap_err();

    assert!(matches!(err, EconomicsError::NotFound(_)));
    assert_eq!(err.code(), ErrorCode::BenchmarkNotFound);
}

#[test]
fn scenarios_never_mutate_the_base_configuration() {
    let base = Arc::new(library_renovation());
    let snapshot = (*base).clone();
    let engine = ScenarioEngine::default();

    let scenarios = vec![
        Scenario::new("revenue -10%").with(ScenarioDelta::RevenueMultiplier { factor: dec!(0.9) }),
        Scenario::new("one more month").with(ScenarioDelta::DurationOffset { months: 1 }),
        Scenario::new("pricier architect").with(ScenarioDelta::RoleRateMultiplier {
            role: "Architect".to_string(),
            factor: dec!(1.2),
        }),
        Scenario::new("ghost role").with(ScenarioDelta::RoleHoursMultiplier {
            role: "Ghost".to_string(),
            factor: dec!(2),
        }),
    ];

    let results = engine.run_batch_parallel(&base, Money::from_units(5_000_000), &scenarios);

    assert_eq!(*base, snapshot);
    assert_eq!(results.len(), 4);
    assert!(results[0].as_ref().unwrap().net_profit() < Money::from_units(2_523_920));
    assert_eq!(results[1].as_ref().unwrap().config().duration_months(), 7);
    assert_eq!(
        results[2].as_ref().unwrap().labor_breakdown()["Architect"],
        Money::from_units(90_000)
    );
    let err = results[3].as_ref().unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::unknown_reference("role", "Ghost")]
    );
}

#[test]
fn repeated_calculation_is_deterministic() {
    let orchestrator = EconomicsOrchestrator::default();
    let config = Arc::new(library_renovation());
    let first = orchestrator
        .calculate(Money::from_units(5_000_000), Arc::clone(&config))
        .unwrap();
    let second = orchestrator
        .calculate(Money::from_units(5_000_000), Arc::clone(&config))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.payback_period_months().map(|m| m > Decimal::ZERO), Some(true));
}
