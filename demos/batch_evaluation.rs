use calcpro::{Context, Evaluator};

fn main() {
    pretty_env_logger::init();

    let contexts: Vec<Context> = vec![
        [("price", 120.0), ("volume", 3000.0)].into_iter().collect(),
        [("price", 80.0), ("volume", 6000.0)].into_iter().collect(),
        [("price", 95.5), ("volume", 0.0)].into_iter().collect(),
    ];

    let formula = "DIVIDE(MULTIPLY(price, 1000), volume)";

    let mut evaluator = Evaluator::default();
    let ast = evaluator.parse_expression(formula).unwrap();
    for (i, result) in evaluator.evaluate_batch(&ast, &contexts).iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
