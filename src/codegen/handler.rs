//! Emit the workflow function.
//!
//! Walks the IR body statement by statement. Branch arms recurse into
//! `emit_block`, one indent level deeper.

use super::literal::{comment_text, emit_literal, quote};
use super::writer::CodeWriter;
use crate::ir::types::*;
use crate::options::CompileOptions;

/// Names shared by every statement of one workflow function.
struct Scope<'a> {
    workflow_type: &'a str,
    failure_return: String,
}

pub fn emit_workflow_fn(ir: &ProgramIR, options: &CompileOptions, w: &mut CodeWriter) {
    let workflow_type = ir.metadata.workflow_type.as_str();
    let scope = Scope {
        workflow_type,
        failure_return: format!("{}Output{{}}", workflow_type),
    };

    w.block_open(&format!(
        "func {wt}(ctx workflow.Context, input {wt}Input) ({wt}Output, error)",
        wt = workflow_type
    ));

    w.line("logger := workflow.GetLogger(ctx)");
    w.line(&format!("logger.Info({})", quote(&format!("{} started", workflow_type))));
    w.blank();

    w.block_open("ao := workflow.ActivityOptions");
    w.line(&format!(
        "StartToCloseTimeout: {} * time.Second,",
        options.activity_timeout_seconds
    ));
    w.line(&format!("TaskQueue: {},", quote(&ir.metadata.task_queue)));
    w.block_close();
    w.line("ctx = workflow.WithActivityOptions(ctx, ao)");

    if !ir.body.statements.is_empty() {
        w.blank();
        emit_block(&ir.body, &scope, w);
    }

    if !ir.body.is_terminating() {
        w.blank();
        w.line("// Incomplete: not every path reaches an end node.");
        w.line(&format!("return {}, nil", scope.failure_return));
    }

    w.block_close();
}

fn emit_block(block: &Block, scope: &Scope, w: &mut CodeWriter) {
    for (i, statement) in block.statements.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        emit_statement(statement, scope, w);
    }
}

fn emit_statement(statement: &Statement, scope: &Scope, w: &mut CodeWriter) {
    match &statement.operation {
        Operation::ExecuteActivity(call) => {
            w.line(&format!(
                "// Node: {} ({})",
                comment_text(&statement.label),
                call.type_key
            ));
            emit_activity(call, scope, w);
        }
        Operation::Branch(branch) => {
            w.line(&format!("// Node: {} (control.if)", comment_text(&statement.label)));
            emit_branch(branch, scope, w);
        }
        Operation::Sleep(sleep) => {
            w.line(&format!("// Node: {} (control.timer)", comment_text(&statement.label)));
            w.block_open(&format!(
                "if err := workflow.Sleep(ctx, {}); err != nil",
                sleep.duration
            ));
            w.line(&format!("return {}, err", scope.failure_return));
            w.block_close();
        }
        Operation::Complete => {
            w.line(&format!("// Node: {} (control.end)", comment_text(&statement.label)));
            w.line(&format!(
                "logger.Info({})",
                quote(&format!("{} completed", scope.workflow_type))
            ));
            w.line(&format!("return {}, nil", scope.failure_return));
        }
    }
}

fn emit_activity(call: &ActivityCall, scope: &Scope, w: &mut CodeWriter) {
    let input_var = format!("actInput_{}", call.var_suffix);
    let result_var = format!("res_{}", call.var_suffix);
    let err_var = format!("err_{}", call.var_suffix);

    if call.inputs.is_empty() {
        w.line(&format!("{} := {}{{}}", input_var, call.input_type));
    } else {
        w.block_open(&format!("{} := {}", input_var, call.input_type));
        for init in &call.inputs {
            w.line(&format!("{}: {},", init.field, emit_literal(&init.value)));
        }
        w.block_close();
    }
    w.line(&format!("var {} {}", result_var, call.output_type));
    w.line(&format!(
        "{} := workflow.ExecuteActivity(ctx, {}, {}).Get(ctx, &{})",
        err_var,
        quote(&call.activity_name),
        input_var,
        result_var
    ));
    w.block_open(&format!("if {} != nil", err_var));
    w.line(&format!("return {}, {}", scope.failure_return, err_var));
    w.block_close();
}

fn emit_branch(branch: &BranchOp, scope: &Scope, w: &mut CodeWriter) {
    w.block_open(&format!("if {}", branch.condition));
    emit_arm("true", branch.true_target.as_deref(), &branch.true_branch, scope, w);
    w.block_else();
    emit_arm("false", branch.false_target.as_deref(), &branch.false_branch, scope, w);
    w.block_close();
}

fn emit_arm(label: &str, target: Option<&str>, body: &Block, scope: &Scope, w: &mut CodeWriter) {
    match target {
        Some(target) => w.line(&format!("// Branch to {}", comment_text(target))),
        None => w.line(&format!("// No {} branch", label)),
    }
    emit_block(body, scope, w);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ir(body: Block) -> ProgramIR {
        ProgramIR {
            metadata: ProgramMetadata {
                workflow_id: "wf".into(),
                workflow_name: "WF".into(),
                schema_version: "wf-dsl/1".into(),
                workflow_type: "Proc".into(),
                task_queue: "Q".into(),
            },
            records: vec![],
            globals: None,
            body,
            diagnostics: vec![],
        }
    }

    fn statement(node_id: &str, operation: Operation) -> Statement {
        Statement {
            node_id: node_id.into(),
            label: node_id.into(),
            operation,
        }
    }

    fn render(body: Block) -> String {
        let mut w = CodeWriter::new();
        emit_workflow_fn(&ir(body), &CompileOptions::default(), &mut w);
        w.finish()
    }

    #[test]
    fn sleep_propagates_error() {
        let out = render(Block {
            statements: vec![
                statement(
                    "wait",
                    Operation::Sleep(SleepOp {
                        duration: "5*time.Minute".into(),
                    }),
                ),
                statement("end", Operation::Complete),
            ],
        });
        assert!(out.contains("\tif err := workflow.Sleep(ctx, 5*time.Minute); err != nil {\n\t\treturn ProcOutput{}, err\n\t}\n"));
        assert!(!out.contains("Incomplete"));
    }

    #[test]
    fn non_terminating_body_gets_fallback_return() {
        let out = render(Block::default());
        assert!(out.contains("// Incomplete: not every path reaches an end node."));
        assert!(out.ends_with("\treturn ProcOutput{}, nil\n}\n"));
    }

    #[test]
    fn branch_arms_are_nested() {
        let out = render(Block {
            statements: vec![statement(
                "check",
                Operation::Branch(BranchOp {
                    condition: "x > 1".into(),
                    true_target: Some("yes".into()),
                    false_target: None,
                    true_branch: Block {
                        statements: vec![statement("yes", Operation::Complete)],
                    },
                    false_branch: Block::default(),
                }),
            )],
        });
        assert!(out.contains("\tif x > 1 {\n\t\t// Branch to yes\n\t\t// Node: yes (control.end)\n"));
        assert!(out.contains("\t} else {\n\t\t// No false branch\n\t}\n"));
    }

    #[test]
    fn activity_without_inputs_uses_empty_literal() {
        let out = render(Block {
            statements: vec![statement(
                "a1",
                Operation::ExecuteActivity(ActivityCall {
                    type_key: "temporal.activity".into(),
                    activity_name: "Ping".into(),
                    var_suffix: "a1".into(),
                    input_type: "A1Input".into(),
                    output_type: "A1Output".into(),
                    inputs: vec![],
                }),
            )],
        });
        assert!(out.contains("\tactInput_a1 := A1Input{}\n\tvar res_a1 A1Output\n"));
        assert!(out.contains("err_a1 := workflow.ExecuteActivity(ctx, \"Ping\", actInput_a1).Get(ctx, &res_a1)"));
    }
}
