//! Compiles one statement or one transition into a block body.
//!
//! Bodies are position independent: they carry no start address, and their
//! branches still name the declared target id.

use super::error::LowerError;
use super::flatten::{check_identifier, Flattener};
use super::signals::SignalMap;
use crate::config::LowerConfig;
use crate::core::{Compute, Expr, MicroOp, OpStep, Operand, Operator, Statement, StateId, Transition};

/// Op-steps of one block before placement.
pub(crate) type BlockBody = Vec<OpStep<StateId>>;

/// Compiles the blocks of a single state, in source order.
pub(crate) struct BlockCompiler<'a> {
    config: &'a LowerConfig,
    state: &'a StateId,
    signals: SignalMap<'a>,
}

impl<'a> BlockCompiler<'a> {
    pub(crate) fn new(config: &'a LowerConfig, state: &'a StateId) -> Self {
        Self {
            config,
            state,
            signals: SignalMap::new(config),
        }
    }

    fn guard(&self) -> Operand {
        Operand::name(self.config.guard_register())
    }

    /// `[GuardBegin]`, `[signal_out = GUARD * right]`.
    pub(crate) fn statement(&mut self, statement: &Statement) -> Result<BlockBody, LowerError> {
        check_identifier(&statement.out)
            .map_err(|reason| LowerError::malformed(self.state, reason))?;
        let amount = match &statement.right {
            Expr::Leaf(operand) => operand,
            Expr::Binary { .. } => {
                return Err(LowerError::malformed(
                    self.state,
                    format!(
                        "increment of `{}` must be a variable or literal, found {}",
                        statement.out, statement.right
                    ),
                ))
            }
        };

        let amount = Flattener::new(self.state, &self.signals, self.config.temp_prefix())
            .leaf(amount)?;
        let signal = self.signals.register(&statement.out);

        Ok(vec![
            OpStep::guard(),
            OpStep::compute(Compute {
                left: self.guard(),
                right: amount,
                operator: Operator::Mul,
                count_from_input: None,
                out: signal,
            }),
        ])
    }

    /// Guarded branch to `transition.goto`.
    ///
    /// A leaf-only condition takes 3 slots: `[GuardBegin]`, the leaf gated
    /// into a fresh temp, then the branch on that temp.
    ///
    /// A compound condition ends with its outermost compute sharing an
    /// op-step with the guard reopen, then gates the result and branches
    /// on it.
    pub(crate) fn transition(&mut self, transition: &Transition) -> Result<BlockBody, LowerError> {
        let goto = transition.goto.clone();
        let Some(condition) = &transition.condition else {
            return Ok(vec![
                OpStep::guard(),
                OpStep::branch(self.config.guard_register(), goto),
            ]);
        };

        let guard = self.guard();
        let mut flattener = Flattener::new(self.state, &self.signals, self.config.temp_prefix());
        let mut body = Vec::new();

        let result = match condition {
            Expr::Leaf(operand) => {
                let value = flattener.leaf(operand)?;
                let out = flattener.fresh_temp();
                body.push(OpStep::guard());
                body.push(OpStep::compute(Compute {
                    left: value,
                    right: guard,
                    operator: Operator::Mul,
                    count_from_input: None,
                    out: out.clone(),
                }));
                out
            }
            Expr::Binary {
                left,
                right,
                operator,
            } => {
                let last = flattener.node(left, right, operator.clone())?;
                let out = last.out.clone();
                body.extend(flattener.into_steps().into_iter().map(OpStep::compute));
                body.push(OpStep(vec![
                    MicroOp::Compute(last),
                    MicroOp::Guard(Default::default()),
                ]));
                body.push(OpStep::compute(Compute {
                    left: Operand::name(out.clone()),
                    right: guard,
                    operator: Operator::Mul,
                    count_from_input: None,
                    out: out.clone(),
                }));
                out
            }
        };

        body.push(OpStep::branch(result, goto));
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Branch, GuardBegin};

    fn compute(left: &str, right: impl Into<Operand>, operator: Operator, out: &str) -> MicroOp<StateId> {
        MicroOp::Compute(Compute {
            left: Operand::from(left),
            right: right.into(),
            operator,
            count_from_input: None,
            out: out.to_string(),
        })
    }

    fn branch(register: &str, goto: impl Into<StateId>) -> MicroOp<StateId> {
        MicroOp::Branch(Branch {
            branch: register.to_string(),
            goto: goto.into(),
        })
    }

    #[test]
    fn statement_is_a_gated_increment() {
        let config = LowerConfig::default();
        let id = StateId::from(10);
        let mut compiler = BlockCompiler::new(&config, &id);

        let body = compiler.statement(&Statement::increment("X", 1)).unwrap();

        assert_eq!(
            body,
            vec![
                OpStep::guard(),
                OpStep(vec![compute("GUARD", 1, Operator::Mul, "signal_X")]),
            ]
        );
    }

    #[test]
    fn unconditional_transition_branches_on_guard() {
        let config = LowerConfig::default();
        let id = StateId::from(20);
        let mut compiler = BlockCompiler::new(&config, &id);

        let body = compiler.transition(&Transition::always(10)).unwrap();

        assert_eq!(body, vec![OpStep::guard(), OpStep(vec![branch("GUARD", 10)])]);
    }

    #[test]
    fn conditional_transition_fuses_comparison_with_guard() {
        let config = LowerConfig::default();
        let id = StateId::from(10);
        let mut compiler = BlockCompiler::new(&config, &id);
        compiler.statement(&Statement::increment("X", 1)).unwrap();

        let condition = Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0);
        let body = compiler
            .transition(&Transition::when(condition, 20))
            .unwrap();

        let mut comparison = Compute {
            left: Operand::from("INT_A"),
            right: Operand::Literal(0),
            operator: Operator::Eq,
            count_from_input: Some(false),
            out: "INT_A".to_string(),
        };
        assert_eq!(
            body,
            vec![
                OpStep(vec![compute("signal_X", 3, Operator::Rem, "INT_A")]),
                OpStep(vec![
                    MicroOp::Compute(comparison.clone()),
                    MicroOp::Guard(GuardBegin)
                ]),
                OpStep(vec![compute("INT_A", "GUARD", Operator::Mul, "INT_A")]),
                OpStep(vec![branch("INT_A", 20)]),
            ]
        );

        // temps restart with the next block
        let body = compiler
            .transition(&Transition::when(Expr::binary("Y", Operator::Eq, 4), 20))
            .unwrap();
        comparison.left = Operand::from("Y");
        comparison.right = Operand::Literal(4);
        assert_eq!(body[0], OpStep(vec![MicroOp::Compute(comparison), MicroOp::Guard(GuardBegin)]));
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn leaf_condition_is_gated_into_a_temp() {
        let config = LowerConfig::default();
        let id = StateId::from("idle");
        let mut compiler = BlockCompiler::new(&config, &id);

        let body = compiler
            .transition(&Transition::when(Expr::var("READY"), "busy"))
            .unwrap();

        assert_eq!(
            body,
            vec![
                OpStep::guard(),
                OpStep(vec![compute("READY", "GUARD", Operator::Mul, "INT_A")]),
                OpStep(vec![branch("INT_A", "busy")]),
            ]
        );
    }

    #[test]
    fn signals_do_not_rewrite_the_increment_target() {
        let config = LowerConfig::default();
        let id = StateId::from(0);
        let mut compiler = BlockCompiler::new(&config, &id);
        compiler.statement(&Statement::increment("X", 1)).unwrap();

        let body = compiler.statement(&Statement::increment("Y", "X")).unwrap();

        assert_eq!(body[1], OpStep(vec![compute("GUARD", "signal_X", Operator::Mul, "signal_Y")]));
    }

    #[test]
    fn leaf_condition_block_is_three_slots_wide() {
        let config = LowerConfig::default();
        let id = StateId::from(0);
        let mut compiler = BlockCompiler::new(&config, &id);

        let leaf = compiler.transition(&Transition::when(Expr::lit(7), 0)).unwrap();
        let compound = compiler
            .transition(&Transition::when(Expr::binary("X", Operator::Gt, 7), 0))
            .unwrap();

        assert_eq!(leaf.len(), 3);
        assert_eq!(compound.len(), 3);
    }

    #[test]
    fn unusual_names_are_accepted() {
        let config = LowerConfig::default();
        let id = StateId::from(0);
        let mut compiler = BlockCompiler::new(&config, &id);

        let body = compiler.statement(&Statement::increment("signal-A", "9lives")).unwrap();

        assert_eq!(body[1], OpStep(vec![compute("GUARD", "9lives", Operator::Mul, "signal_signal-A")]));
    }

    #[test]
    fn empty_increment_target_is_malformed() {
        let config = LowerConfig::default();
        let id = StateId::from(0);
        let mut compiler = BlockCompiler::new(&config, &id);

        let result = compiler.statement(&Statement::increment("", 1));

        assert!(matches!(result, Err(LowerError::MalformedExpression { .. })));
    }

    #[test]
    fn compound_increment_is_malformed() {
        let config = LowerConfig::default();
        let id = StateId::from(0);
        let mut compiler = BlockCompiler::new(&config, &id);
        let statement = Statement::increment("X", Expr::var("A").op(Operator::Add, 1));

        let result = compiler.statement(&statement);

        assert!(matches!(result, Err(LowerError::MalformedExpression { .. })));
    }
}
