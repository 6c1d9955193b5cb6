//! Basic shaped array creation, reduction and broadcasting examples.
//!
//! This example demonstrates the core functionality of shaped-core:
//! - Creating arrays with different initialization methods
//! - Inspecting shape, rank and scalars
//! - Reducing along axes with and without kept dimensions
//! - Broadcasting arithmetic and elementwise math
//!
//! Engine events are logged through `tracing`; set `RUST_LOG` to see them:
//! ```bash
//! RUST_LOG=shaped_core=trace cargo run --example basic_array
//! ```

use anyhow::Result;
use shaped_core::{PrintOptions, ShapedArray};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() -> Result<()> {
    init_tracing()?;

    println!("=== shaped-core: Basic Array Examples ===\n");

    example_creation()?;
    example_reductions()?;
    example_broadcasting()?;
    example_printing()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let fmt_layer = fmt::layer().compact().with_target(true).with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).try_init()?;
    Ok(())
}

fn example_creation() -> Result<()> {
    println!("--- Example 1: Array Creation ---");

    let zeros = ShapedArray::<f64>::zeros(&[2, 3]);
    println!("Zeros [2, 3]:\n{}", zeros);

    let fives = ShapedArray::repeating(5, &[2, 2, 2]);
    println!("\nRepeating 5 [2, 2, 2], element [0, 1, 1]: {}", fives[&[0, 1, 1]]);

    let from_vec = ShapedArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    println!("\nFrom vec [2, 3]:\n{}", from_vec);

    let scalar = ShapedArray::scalar(42);
    println!("\nScalar: {} (rank {})", scalar, scalar.rank());

    let grid = ShapedArray::from_shape_fn(&[3, 3], |idx| (idx[0] * 3 + idx[1]) as i32);
    println!("\nFrom shape fn [3, 3]:\n{}", grid);

    match ShapedArray::from_vec(vec![1, 2, 3], &[2, 2]) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("\nRejected construction: {}", err),
    }
    Ok(())
}

fn example_reductions() -> Result<()> {
    println!("\n--- Example 2: Reductions ---");

    let array = ShapedArray::new((0..18).map(f64::from).collect(), &[3, 2, 3]);
    println!("Array [3, 2, 3]:\n{}", array);
    println!("\nsum() = {}", array.sum());
    println!("mean() = {}", array.mean()?);

    let squeezed = array.sum_squeezing_axes(&[0])?;
    println!("\nsum over axis 0, squeezed {:?}:\n{}", squeezed.shape(), squeezed);

    let kept = array.sum_along_axes(&[0])?;
    println!("\nsum over axis 0, kept {:?}:\n{}", kept.shape(), kept);

    let means = array.mean_squeezing_axes(&[0, -1])?;
    println!("\nmean over axes [0, -1]: {}", means);

    let peaks = array.reduce(&[1, 2], false, f64::MIN, |x, acc| x.max(*acc))?;
    println!("max over axes [1, 2]: {}", peaks);
    Ok(())
}

fn example_broadcasting() -> Result<()> {
    println!("\n--- Example 3: Broadcasting ---");

    let column = ShapedArray::new(vec![1.0_f64, 2.0, 3.0, 4.0], &[4, 1]);
    let row = ShapedArray::new(vec![10.0_f64, 20.0, 30.0], &[3]);
    let table = column.broadcast_add(&row)?;
    println!("[4, 1] + [3] -> {:?}:\n{}", table.shape(), table);

    let scaled = &table * 0.5;
    println!("\nscaled by 0.5:\n{}", scaled);

    let roots = table.sqrt();
    println!("\nsqrt:\n{}", roots.map(|x: &f64| (x * 100.0).round() / 100.0));

    if let Err(err) = ShapedArray::<f64>::ones(&[2, 3]).broadcast_add(&row.reshape(&[3, 1])?) {
        println!("\nRejected broadcast: {}", err);
    }
    Ok(())
}

fn example_printing() -> Result<()> {
    println!("\n--- Example 4: Printing ---");

    let long = ShapedArray::new((0..1000).collect::<Vec<i32>>(), &[10, 100]);
    println!("Summarized with {{:#}}:\n{:#}", long);

    let options = PrintOptions::from_env().with_line_width(40);
    let first_row = long.element(0)?.to_owned_array();
    println!("\nWrapped at 40 columns:\n{}", first_row.description(&options));
    Ok(())
}
