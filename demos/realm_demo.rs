use realm_bridge::*;
use std::process;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Scenario {
    /// A wrapped `add` from realm B called from realm A
    Add,
    /// A callable returned across the boundary
    Rewrap,
    /// An exception thrown in B surfaces as A's TypeError
    Throw,
    /// Mutually recursive wrappers hit the call depth limit
    Recursion,
    /// ShadowRealm import of an exported function
    Import,
    /// Run every scenario
    All,
}

#[derive(clap::Parser)]
#[command(name = "realm_demo", version, about = "Cross-realm wrapped function demo")]
struct Cli {
    /// Scenario to run
    #[arg(value_enum, default_value = "all")]
    scenario: Scenario,

    /// Maximum agent call depth
    #[arg(short, long, default_value_t = 128)]
    max_call_depth: usize,

    /// Do not copy `name` / `length` onto wrappers
    #[arg(long)]
    omit_metadata: bool,
}

fn add<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    match (args.first(), args.get(1)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => Ok(Value::Number(x + y)),
        _ => Err(throw_realm_error(mc, call.realm, ErrorType::TypeError, "add expects two numbers")),
    }
}

fn return_data<'gc>(
    _mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(call.data.clone())
}

fn throw_data<'gc>(
    _mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Err(EvalError::Throw(call.data.clone()))
}

fn bounce<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let f = args.first().cloned().unwrap_or(Value::Undefined);
    evaluate_call_dispatch(mc, call.realm, &f, &Value::Undefined, &[f.clone()])
}

fn describe(result: &Result<Value<'_>, EvalError<'_>>) -> String {
    match result {
        Ok(v) => format!("ok: {}", value_to_string(v)),
        Err(EvalError::Throw(v)) => format!("threw: {}", value_to_string(v)),
        Err(EvalError::Js(e)) => format!("host error: {e}"),
    }
}

fn run(arena: &JsArena, scenario: Scenario) {
    arena.mutate(|mc, root| {
        let a = create_realm(mc, root.agent, "A");
        let b = create_realm(mc, root.agent, "B");
        let n = |x: f64| Value::Number(x);

        match scenario {
            Scenario::Add => {
                let add_b = new_native_function(mc, b, "add", 2, add);
                let w = match get_wrapped_value(mc, &add_b, a) {
                    Ok(w) => w,
                    Err(e) => return println!("add: {e}"),
                };
                println!("add: wrapper is {}", value_to_string(&w));
                println!("add: {}", describe(&evaluate_call_dispatch(mc, a, &w, &Value::Undefined, &[n(1.0), n(2.0)])));
            }
            Scenario::Rewrap => {
                let g = new_native_function(mc, b, "g", 2, add);
                let make_g = new_native_function_with_data(mc, b, "makeG", 0, return_data, g);
                let Ok(w) = get_wrapped_value(mc, &make_g, a) else {
                    return;
                };
                match evaluate_call_dispatch(mc, a, &w, &Value::Undefined, &[]) {
                    Ok(g_in_a) => {
                        println!("rewrap: got {}", value_to_string(&g_in_a));
                        println!("rewrap: {}", describe(&evaluate_call_dispatch(mc, a, &g_in_a, &Value::Undefined, &[n(2.0), n(3.0)])));
                    }
                    Err(e) => println!("rewrap: {}", e.message()),
                }
            }
            Scenario::Throw => {
                let secret = create_error(mc, b, ErrorType::Error, "secret from B");
                let thrower = new_native_function_with_data(mc, b, "throwsError", 0, throw_data, secret);
                let Ok(w) = get_wrapped_value(mc, &thrower, a) else {
                    return;
                };
                let result = evaluate_call_dispatch(mc, a, &w, &Value::Undefined, &[]);
                let is_type_error = result
                    .as_ref()
                    .err()
                    .and_then(|e| e.thrown_value())
                    .is_some_and(|v| is_realm_error(v, a, ErrorType::TypeError));
                println!("throw: {} (A TypeError: {is_type_error})", describe(&result));
            }
            Scenario::Recursion => {
                let bounce_b = new_native_function(mc, b, "bounce", 1, bounce);
                let Ok(w) = get_wrapped_value(mc, &bounce_b, a) else {
                    return;
                };
                let result = evaluate_call_dispatch(mc, a, &w, &Value::Undefined, &[w.clone()]);
                println!("recursion: {} (depth after: {})", describe(&result), root.agent.call_depth());
            }
            Scenario::Import => {
                let shadow = ShadowRealm::new(mc, a, "shadow");
                let add_inner = new_native_function(mc, shadow.realm(), "add", 2, add);
                if let Err(e) = shadow.export_value(mc, "add", add_inner) {
                    return println!("import: {}", e.message());
                }
                match shadow.import_value(mc, "add") {
                    Ok(f) => println!("import: {}", describe(&evaluate_call_dispatch(mc, a, &f, &Value::Undefined, &[n(20.0), n(22.0)]))),
                    Err(e) => println!("import: {}", e.message()),
                }
                println!("import missing: {}", describe(&shadow.import_value(mc, "missing")));
            }
            Scenario::All => unreachable!(),
        }
    });
}

fn main() {
    let cli = <Cli as clap::Parser>::parse();

    // Initialize logger (controlled by RUST_LOG)
    env_logger::init();

    if cli.max_call_depth == 0 {
        eprintln!("Error: --max-call-depth must be at least 1");
        process::exit(1);
    }

    let mut options = HostOptions::default().with_max_call_depth(cli.max_call_depth);
    if cli.omit_metadata {
        options = options.with_metadata_policy(MetadataPolicy::Omit);
    }
    let arena = new_arena(options);

    let scenarios = match cli.scenario {
        Scenario::All => vec![Scenario::Add, Scenario::Rewrap, Scenario::Throw, Scenario::Recursion, Scenario::Import],
        one => vec![one],
    };
    for scenario in scenarios {
        run(&arena, scenario);
    }
}
