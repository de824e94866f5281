//! Integration tests for the resolution engine's contract.

use loopsmith::domain::{Action, Amount, Pool, PoolCatalog, PoolId, StrategyId};
use loopsmith::solver::filters::Named;
use loopsmith::solver::optimizers::BestSupplyRate;
use loopsmith::solver::{blend, LoopSchedule, Optimizer, PoolFilter, SolveError, Step};
use loopsmith::strategy::{shapes, Strategy, StrategyStatus};
use loopsmith::testkit::{catalog, four_leg_factors, pool, two_venue_catalog};
use rust_decimal_macros::dec;

fn stake_step(asset: &str) -> Step {
    Step::new(
        format!("Stake {asset}"),
        vec![Box::new(Named::new(PoolId::from(asset))) as Box<dyn PoolFilter>],
        Box::new(BestSupplyRate),
    )
}

#[test]
fn successful_solve_yields_one_action_per_step_in_order() {
    let mut strategy = shapes::delta_neutral_loop(
        StrategyId::from("neutral"),
        "hyperlend".into(),
        "wsteth".into(),
        four_leg_factors(),
        6,
    )
    .unwrap();

    strategy.solve(&two_venue_catalog(), dec!(1000)).unwrap();

    let actions = strategy.actions();
    assert_eq!(actions.len(), strategy.steps().len());
    for (action, step) in actions.iter().zip(strategy.steps()) {
        assert_eq!(action.step_name(), step.name());
    }
}

#[test]
fn net_yield_is_the_literal_signed_sum() {
    // deposit $600 @ 10%, borrow $400 @ 4%, deposit $400 @ 8%,
    // principal $1000
    let actions = vec![
        Action::new(pool("a", "x", dec!(0.10), dec!(0.02)), dec!(600), true),
        Action::new(pool("a", "y", dec!(0.01), dec!(0.04)), dec!(400), false),
        Action::new(pool("b", "y", dec!(0.08), dec!(0.03)), dec!(400), true),
    ];

    let blended = blend(&actions, dec!(1000)).unwrap();
    assert_eq!(blended.net_yield(), dec!(0.076));
    assert_eq!(blended.leverage(), dec!(0.76));
}

#[test]
fn loop_amount_is_factor_lookup_independent_of_rates() {
    let schedule =
        LoopSchedule::try_new(vec![dec!(1), dec!(0.6), dec!(1), dec!(0.58), dec!(0.55)], 6)
            .unwrap();
    assert_eq!(schedule.amount_at(1, dec!(1000)), Some(dec!(600)));
}

#[test]
fn filter_exhaustion_aborts_without_reaching_solved() {
    let mut strategy = Strategy::try_new(
        StrategyId::from("missing-asset"),
        vec![stake_step("usdc"), stake_step("wbtc")],
    )
    .unwrap();

    let error = strategy.solve(&two_venue_catalog(), dec!(1000)).unwrap_err();
    assert!(matches!(error, SolveError::FilterExhausted { .. }));
    assert_ne!(strategy.status(), StrategyStatus::Solved);
    assert!(strategy.actions().len() < strategy.steps().len());
    assert_eq!(strategy.actions().len(), 1);
}

#[test]
fn empty_catalog_aborts_cleanly() {
    let mut strategy = Strategy::try_new(StrategyId::from("empty"), vec![stake_step("usdc")])
        .unwrap();

    let error = strategy.solve(&PoolCatalog::new(), dec!(1000)).unwrap_err();
    assert!(matches!(error, SolveError::FilterExhausted { .. }));
    assert!(strategy.actions().is_empty());
}

struct PushN(usize);

impl Optimizer for PushN {
    fn name(&self) -> &'static str {
        "push-n"
    }

    fn optimize(&self, pools: &[Pool], principal: Amount, mut actions: Vec<Action>) -> Vec<Action> {
        for _ in 0..self.0 {
            actions.push(Action::new(pools[0].clone(), principal, true));
        }
        actions
    }
}

#[test]
fn optimizer_returning_zero_actions_aborts_at_that_step() {
    let mut strategy = Strategy::try_new(
        StrategyId::from("lazy"),
        vec![stake_step("usdc"), Step::new("Nothing", vec![], Box::new(PushN(0)))],
    )
    .unwrap();

    let error = strategy.solve(&two_venue_catalog(), dec!(1000)).unwrap_err();
    assert!(matches!(
        error,
        SolveError::OptimizerContract {
            step: 1,
            expected: 2,
            actual: 1,
            ..
        }
    ));
    // one step completed strictly before the offending one
    assert_eq!(strategy.actions().len(), 1);
}

#[test]
fn optimizer_returning_two_actions_aborts_at_that_step() {
    let mut strategy = Strategy::try_new(
        StrategyId::from("greedy"),
        vec![stake_step("usdc"), Step::new("Double", vec![], Box::new(PushN(2)))],
    )
    .unwrap();

    let error = strategy.solve(&two_venue_catalog(), dec!(1000)).unwrap_err();
    assert!(matches!(
        error,
        SolveError::OptimizerContract {
            step: 1,
            expected: 2,
            actual: 3,
            ..
        }
    ));
    assert_eq!(strategy.actions().len(), 1);
}

#[test]
fn solve_is_idempotent_on_unchanged_input() {
    let catalog = two_venue_catalog();
    let mut strategy = shapes::delta_neutral_loop(
        StrategyId::from("neutral"),
        "hyperlend".into(),
        "wsteth".into(),
        four_leg_factors(),
        6,
    )
    .unwrap();

    strategy.solve(&catalog, dec!(1000)).unwrap();
    let first: Vec<Action> = strategy.actions().to_vec();

    strategy.solve(&catalog, dec!(1000)).unwrap();
    assert_eq!(strategy.actions(), first.as_slice());
}

#[test]
fn ties_resolve_to_catalog_order() {
    let tied = catalog(vec![
        pool("first", "usdc", dec!(0.05), dec!(0.01)),
        pool("second", "usdc", dec!(0.05), dec!(0.01)),
    ]);
    let mut strategy =
        Strategy::try_new(StrategyId::from("tied"), vec![stake_step("usdc")]).unwrap();

    strategy.solve(&tied, dec!(1000)).unwrap();
    assert_eq!(strategy.actions()[0].pool().protocol().as_str(), "first");
}
