use calcpro::Context;

fn main() {
    pretty_env_logger::init();

    let formula = "MULTIPLY(SUBTRACT(price, cost), volume)";
    let ast = calcpro::parse(formula).expect("Failed to parse");
    println!("Parsed: {}", ast);

    let contexts: [Context; 2] = [
        [("price", 120.0), ("cost", 100.0), ("volume", 3000.0)]
            .into_iter()
            .collect(),
        [("PRICE", 80.0), ("COST", 95.0)].into_iter().collect(),
    ];

    for context in &contexts {
        match calcpro::evaluate(&ast, context) {
            Ok(result) => println!("Result: {}", result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
