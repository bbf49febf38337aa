use calcpro::{formula_fn, operators, Arity, Context, EvaluationError, Evaluator};

#[formula_fn]
fn average(a: f64, b: f64) -> Result<f64, EvaluationError> {
    Ok((a + b) / 2.0)
}

fn main() {
    pretty_env_logger::init();

    let mut evaluator = Evaluator::default();
    let context: Context = [("x", 5.0), ("y", 9.0)].into_iter().collect();

    let formula = "AVERAGE(x, MAX(y, 12))";
    if let Err(err) = evaluator.evaluate_expression(formula, &context) {
        println!("Before registration: {}", err);
    }

    evaluator.register_function("average", Arity::Exact(2), average);
    evaluator.register_function("max", Arity::AtLeast(1), |args| {
        Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    });

    match evaluator.evaluate_expression(formula, &context) {
        Ok(result) => println!("{} = {}", formula, result),
        Err(err) => println!("Error: {}", err),
    }

    let mut registry = evaluator.registry().clone();
    operators::math::register(&mut registry);
    println!("Operators: {}", registry.names().join(", "));
}
