//! End-to-end tests of the default pipeline through the facade.

use std::cell::RefCell;
use std::rc::Rc;

use llbasic::ir::{Module, VarDecl};
use llbasic::*;

/// `int add(int a, int b) { return a + b; }` plus an extern `print` and a
/// `main` that calls both.
fn sample_program() -> Program {
    let mut program = Program::new();
    let mut b = program.builder();

    let v = b.arg("v", "int");
    let print = b.function("print", "void", vec![v], None);

    let a = b.arg("a", "int");
    let bb = b.arg("b", "int");
    let lhs = b.ident("a");
    let rhs = b.ident("b");
    let sum = b.binary(BinaryOperator::Add, lhs, rhs);
    let ret = b.return_stmt(Some(sum));
    let add_body = b.body(vec![ret]);
    let add = b.function("add", "int", vec![a, bb], Some(add_body));

    let two = b.int(2);
    let three = b.int(3);
    let call_add = b.call("add", vec![two, three]);
    let total = b.local("total", "int", Some(call_add));
    let arg = b.ident("total");
    let call_print = b.call("print", vec![arg]);
    let stmt = b.expr_stmt(call_print);
    let main_body = b.body(vec![total, stmt]);
    let main = b.function("main", "void", vec![], Some(main_body));

    let counter = b.global("counter", "int", None);
    b.module("main", vec![print, add, main], vec![counter]).unwrap();
    program
}

#[test]
fn test_compile_produces_full_translation_unit() {
    let ctx = compile(sample_program(), CompilerOptions::default().in_memory()).unwrap();
    let text = ctx.artifact.unwrap();

    assert_eq!(
        text,
        "// auto generated by llbasic compiler\n\
         #include \"llb_runtime.h\"\n\
         \n\
         // decls from 'main'\n\
         extern void print(int v);\n\
         static int add(int a, int b);\n\
         static void main();\n\
         \n\
         // globals from 'main'\n\
         static int counter;\n\
         \n\
         static int add(int a, int b) {\n\
         \x20 return (a+b);\n\
         }\n\
         \n\
         static void main() {\n\
         \x20 int total;\n\
         \x20 total=add(2, 3);\n\
         \x20 print(total);\n\
         }\n\
         \n"
    );
}

#[test]
fn test_compile_fills_side_tables() {
    let ctx = compile(sample_program(), CompilerOptions::default().in_memory()).unwrap();
    let ast = ctx.program.ast();
    let module = ast.expect::<Module>(ctx.program.modules()[0]).unwrap();
    let main = module.functions[2];
    let main_decl = ast.expect::<llbasic::ir::FunctionDecl>(main).unwrap();
    let body = main_decl.body.unwrap();

    let locals = ctx.annotations.locals.get(body).unwrap();
    assert_eq!(locals.len(), 1);
    assert_eq!(ast.expect::<VarDecl>(locals[0]).unwrap().name().unwrap(), "total");
    assert_eq!(
        ctx.annotations.value_types.get(main),
        Some(&ValueType::Void)
    );
}

#[test]
fn test_compile_writes_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cpp");

    let ctx = compile(
        sample_program(),
        CompilerOptions::default().with_output_path(&path),
    )
    .unwrap();

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(Some(on_disk), ctx.artifact);
}

#[test]
fn test_unwritable_destination_returns_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.cpp");

    let err = compile(
        sample_program(),
        CompilerOptions::default().with_output_path(&path),
    )
    .unwrap_err();

    assert!(err.is_io(), "expected an io failure, got {err}");
    assert!(!path.exists());
}

#[test]
fn test_resolution_failure_stops_before_codegen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cpp");

    let mut program = Program::new();
    let mut b = program.builder();
    b.at(3, 5);
    let missing = b.ident("missing");
    let stmt = b.expr_stmt(missing);
    let body = b.body(vec![stmt]);
    let main = b.function("main", "void", vec![], Some(body));
    b.module("main", vec![main], vec![]).unwrap();

    let err = compile(program, CompilerOptions::default().with_output_path(&path)).unwrap_err();
    assert_eq!(err, Fail::at("unknown identifier 'missing'", Location::new(3, 5)));
    assert_eq!(err.to_string(), "at 3:5: unknown identifier 'missing'");
    assert!(!path.exists(), "codegen must not run after a failed pass");
}

#[test]
fn test_compilation_is_deterministic() {
    let options = CompilerOptions::default().in_memory();
    let first = compile(sample_program(), options.clone()).unwrap().artifact;
    let second = compile(sample_program(), options).unwrap().artifact;
    assert_eq!(first, second);
}

#[test]
fn test_forward_declarations_precede_globals_precede_bodies() {
    let mut program = Program::new();
    let mut b = program.builder();
    for name in ["alpha", "beta"] {
        let body = b.body(vec![]);
        let f = b.function(&format!("{name}_run"), "void", vec![], Some(body));
        let g = b.global(&format!("{name}_state"), "int", None);
        b.module(name, vec![f], vec![g]).unwrap();
    }

    let text = compile(program, CompilerOptions::default().in_memory())
        .unwrap()
        .artifact
        .unwrap();

    let last_decl = text.rfind("static void beta_run();").unwrap();
    let first_global = text.find("// globals from 'alpha'").unwrap();
    let last_global = text.rfind("static int beta_state;").unwrap();
    let first_body = text.find("static void alpha_run() {").unwrap();
    assert!(last_decl < first_global);
    assert!(last_global < first_body);
}

/// A pass observing the context after the default passes.
struct Inspect {
    seen: Rc<RefCell<Option<String>>>,
}

impl Pass for Inspect {
    fn id(&self) -> PassId {
        PassId::new("inspect")
    }

    fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()> {
        *self.seen.borrow_mut() = ctx.artifact.clone();
        Ok(())
    }
}

/// Backend that additionally requests the inspection pass.
struct ChainedBackend(CppBackend);

impl Pass for ChainedBackend {
    fn id(&self) -> PassId {
        self.0.id()
    }

    fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()> {
        self.0.run(ctx)
    }

    fn dependent_passes(&self, scheduler: &mut Scheduler) {
        scheduler.schedule(PassId::new("inspect"));
    }
}

#[test]
fn test_custom_passes_extend_the_default_pipeline() {
    let seen = Rc::new(RefCell::new(None));
    let mut manager = PassManager::default_pipeline();
    manager.register(ChainedBackend(CppBackend::new()));
    manager.register(Inspect {
        seen: Rc::clone(&seen),
    });

    let mut ctx = CompilationContext::new(sample_program(), CompilerOptions::default().in_memory());
    manager.run(&mut ctx).unwrap();

    assert_eq!(
        manager.executed(),
        &[PassId::RESOLVE, PassId::CODEGEN_CPP, PassId::new("inspect")]
    );
    assert_eq!(*seen.borrow(), ctx.artifact);
}

#[test]
fn test_tree_printer_lists_the_program() {
    let program = sample_program();
    let dump = TreePrinter::print(&program).unwrap();
    assert!(dump.starts_with("Module main\n  FunctionDecl print: void (extern)\n"));
    assert!(dump.contains("      Return\n        BinaryOp +\n"));
}
