use calcpro::{Context, Evaluator};

fn main() {
    pretty_env_logger::init();

    let mut evaluator = Evaluator::default();
    let mut context = Context::new();
    context.set_variable("x", 5.0);

    let formulas = [
        "ADD(5, 10)",
        "MULTIPLY(ADD(2, 3), 4)",
        "DIVIDE(SUBTRACT(20, 4), 2)",
        "MULTIPLY(ADD(x, 3), 2)",
        "DIVIDE(5, 0)",
        "ADD(y, 1)",
        "MODULO(5, 2)",
    ];

    for formula in formulas {
        match evaluator.evaluate_expression(formula, &context) {
            Ok(result) => println!("{} = {}", formula, result),
            Err(err) => println!("{} -> Error: {}", formula, err),
        }
    }

    for (name, value) in context.variables() {
        println!("{} = {}", name, value);
    }
}
