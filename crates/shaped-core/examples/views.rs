//! Slice views and shape operations examples.
//!
//! This example demonstrates:
//! - Element-array and subarray views over a shared buffer
//! - Writing through mutable views
//! - Reshape, expand/squeeze and permute
//! - Splitting, stacking and unstacking
//!
//! Run with:
//! ```bash
//! cargo run --example views
//! ```

use anyhow::Result;
use shaped_core::ShapedArray;

fn main() -> Result<()> {
    println!("=== shaped-core: Views and Shape Operations ===\n");

    example_views()?;
    example_mutable_views()?;
    example_reshape()?;
    example_split_stack()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_views() -> Result<()> {
    println!("--- Example 1: Views Without Copying ---");

    let array = ShapedArray::new((0..60).collect::<Vec<i32>>(), &[3, 4, 5]);

    let plane = array.element(2)?;
    println!("array.element(2): shape {:?}", plane.shape());
    println!("  covers buffer range {:?}", plane.scalar_range());

    let scalar = plane.element(0)?.element(3)?;
    println!("array[2][0][3]: shape {:?}, scalar {:?}", scalar.shape(), scalar.scalars());

    let middle = array.subarray(1..3)?;
    println!("array[1..3]: shape {:?}", middle.shape());
    println!("  its first element starts at {}", middle.element(0)?.scalars()[0]);

    for (i, row) in array.element(0)?.elements().enumerate() {
        println!("  plane 0, row {}: sum {}", i, row.sum());
    }
    Ok(())
}

fn example_mutable_views() -> Result<()> {
    println!("\n--- Example 2: Writing Through Views ---");

    let mut grid = ShapedArray::<i32>::zeros(&[4, 3]);
    grid.assign_element(0, &ShapedArray::new(vec![1, 2, 3], &[3]))?;

    {
        let mut tail = grid.subarray_mut(2..4)?;
        tail.fill(9);
        tail.element_mut(1)?.scalars_mut()[2] = -1;
    }
    println!("after writes:\n{}", grid);

    match grid.assign_subarray(0..2, &ShapedArray::repeating(0, &[3])) {
        Ok(()) => println!("unexpected success"),
        Err(err) => println!("rejected assignment: {}", err),
    }
    Ok(())
}

fn example_reshape() -> Result<()> {
    println!("\n--- Example 3: Reshape and Axes ---");

    let array = ShapedArray::new((0..24).collect::<Vec<i32>>(), &[2, 3, 4]);

    let reshaped = array.reshape(&[4, -1])?;
    println!("reshape [4, -1]: {:?}", reshaped.shape());

    let expanded = array.expand_dims(&[0, -1])?;
    println!("expand_dims [0, -1]: {:?}", expanded.shape());
    println!("squeeze_dims []: {:?}", expanded.squeeze_dims(&[])?.shape());

    let permuted = array.permute(&[2, 0, 1])?;
    println!("permute [2, 0, 1]: {:?}", permuted.shape());
    println!(
        "  array[1, 2, 3] = {}, permuted[3, 1, 2] = {}",
        array[&[1, 2, 3]],
        permuted[&[3, 1, 2]]
    );

    if let Err(err) = array.reshape(&[-1, -1]) {
        println!("rejected reshape: {}", err);
    }
    Ok(())
}

fn example_split_stack() -> Result<()> {
    println!("\n--- Example 4: Split, Stack, Unstack ---");

    let array = ShapedArray::new((0..12).collect::<Vec<i32>>(), &[2, 6]);

    let parts = array.split(3, 1)?;
    for (i, part) in parts.iter().enumerate() {
        println!("part {}: {:?} {:?}", i, part.shape(), part.scalars());
    }

    let stacked = ShapedArray::stack(&parts, 0)?;
    println!("stacked parts along a new axis 0: {:?}", stacked.shape());

    let rows = array.unstack(0)?;
    let restored = ShapedArray::stack(&rows, 0)?;
    println!("unstack then stack restores the array: {}", restored == array);
    Ok(())
}
