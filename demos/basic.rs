//! Basic example of using the letter-square engine

use squares_core::{build_spec, contains_word, run_pipeline, GridSampler};

fn main() -> Result<(), squares_core::SquaresError> {
    let spec = build_spec(4, 4, ["SWOT", "PIG", "AND", "GNU"])?;
    println!("Required characters: {:?}", spec.required_chars());
    println!("Padding pool: {:?}\n", spec.padding_pool());

    // Draw a single random candidate
    let mut rng = rand::thread_rng();
    let candidate = GridSampler::new(&spec).sample(&mut rng, 0, 0)?;
    println!("A random candidate:\n{}\n", candidate);
    for word in spec.words() {
        let word_str: String = word.iter().collect();
        println!("  {:<6} {}", word_str, contains_word(&candidate, word));
    }

    // Race the pools, with the fixture injected so the run always ends
    println!("\nSearching...");
    let found = run_pipeline(spec, 2, 4, true)?;
    println!(
        "Found by owner {} (seq {}, self-test: {}):\n{}",
        found.owner_id(),
        found.sequence(),
        found.is_self_test(),
        found
    );
    Ok(())
}
