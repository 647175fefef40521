//! Step and render throughput for the generic engine

use std::time::Instant;

use cellular_automata::domain::{Automaton, BoundaryPolicy, Fixed, Life, Random, Wrap, rules};

fn life(size: i64, boundary: impl BoundaryPolicy<Life> + 'static) -> Automaton<Life> {
    Automaton::new(
        size,
        size,
        rules::life_rule::<Life>(),
        rules::life_color::<Life>(),
        boundary,
        rules::coin_flip::<Life>(),
    )
}

fn benchmark_step(mut automaton: Automaton<Life>, iterations: u32) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        automaton.step();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_render(automaton: &Automaton<Life>, iterations: u32) -> f64 {
    let mut buffer = automaton.render();
    let start = Instant::now();
    for _ in 0..iterations {
        automaton.render_into(&mut buffer);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_construct(size: i64) -> f64 {
    let start = Instant::now();
    let automaton = life(size, Wrap);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    assert_eq!(automaton.len(), (size * size) as usize);
    elapsed
}

fn main() {
    println!("=== Cellular Automaton Engine Benchmark ===\n");

    let sizes = [100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Size", "Build", "Wrap", "Dead", "Random", "Render"
    );
    println!("{:-<76}", "");

    for size in sizes {
        let build_ms = benchmark_construct(size);
        let wrap_ms = benchmark_step(life(size, Wrap), iterations);
        let dead_ms = benchmark_step(life(size, Fixed::dead()), iterations);
        let random_ms = benchmark_step(life(size, Random), iterations);
        let render_ms = benchmark_render(&life(size, Wrap), iterations);

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            format!("{}x{}", size, size),
            build_ms,
            wrap_ms,
            dead_ms,
            random_ms,
            render_ms
        );
    }

    println!("\n=== Throughput at 2000x2000 ===\n");

    let cells = 2000 * 2000;
    let wrap_ms = benchmark_step(life(2000, Wrap), iterations);
    println!(
        "Wrap step: {:.2} ms/gen, {:.1}M cells/sec",
        wrap_ms,
        (cells as f64) / (wrap_ms / 1000.0) / 1_000_000.0
    );
}
