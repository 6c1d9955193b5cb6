//! Text rendering of shaped arrays
//!
//! Arrays render as nested brackets, one bracket level per dimension:
//!
//! ```text
//! [[[ 0,  1,  2],
//!   [ 3,  4,  5]],
//!
//!  [[ 6,  7,  8],
//!   [ 9, 10, 11]]]
//! ```
//!
//! Scalars are right-aligned to a common width. Innermost rows wrap before
//! exceeding [`PrintOptions::line_width`]; each additional nesting level adds
//! one blank line between siblings. With [`PrintOptions::summarizing`] set,
//! any axis longer than twice [`PrintOptions::edge_element_count`] shows only
//! its leading and trailing entries around a `...` marker.
//!
//! # Environment Variables
//!
//! [`PrintOptions::from_env`] reads:
//!
//! - `SHAPED_LINE_WIDTH`: maximum line width (default `80`)
//! - `SHAPED_EDGE_ITEMS`: entries kept at each end when summarizing (default `3`)
//! - `SHAPED_SUMMARIZE`: `1`/`true` to summarize long axes (default off)

use std::fmt::Display;

/// Rendering configuration
///
/// # Examples
///
/// ```
/// use shaped_core::describe::{describe, PrintOptions};
///
/// let options = PrintOptions::default()
///     .with_summarizing(true)
///     .with_edge_element_count(2);
/// let scalars: Vec<i32> = (0..10).collect();
/// assert_eq!(describe(&[10], &scalars, &options), "[0, 1, ..., 8, 9]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Maximum characters per line before an innermost row wraps
    pub line_width: usize,
    /// Entries shown at each end of a summarized axis
    pub edge_element_count: usize,
    /// Elide the middle of long axes
    pub summarizing: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            edge_element_count: 3,
            summarizing: false,
        }
    }
}

impl PrintOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum line width
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set how many entries a summarized axis keeps at each end
    pub fn with_edge_element_count(mut self, count: usize) -> Self {
        self.edge_element_count = count;
        self
    }

    /// Enable or disable summarizing
    pub fn with_summarizing(mut self, summarizing: bool) -> Self {
        self.summarizing = summarizing;
        self
    }

    /// Options from the `SHAPED_*` environment variables.
    ///
    /// Absent or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let line_width = lookup("SHAPED_LINE_WIDTH")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.line_width);
        let edge_element_count = lookup("SHAPED_EDGE_ITEMS")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.edge_element_count);
        let summarizing = lookup("SHAPED_SUMMARIZE")
            .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(defaults.summarizing);
        Self {
            line_width,
            edge_element_count,
            summarizing,
        }
    }

    /// Positions along an axis of `size` entries to render; `None` marks the gap.
    fn visible(&self, size: usize) -> Vec<Option<usize>> {
        let edge = self.edge_element_count;
        if self.summarizing && size > 2 * edge {
            (0..edge)
                .map(Some)
                .chain(std::iter::once(None))
                .chain((size - edge..size).map(Some))
                .collect()
        } else {
            (0..size).map(Some).collect()
        }
    }
}

/// Render a row-major buffer of the given shape.
///
/// `scalars` must hold `product(shape)` values. A rank-0 shape renders the
/// bare scalar.
///
/// ```
/// use shaped_core::describe::{describe, PrintOptions};
///
/// let text = describe(&[2, 3], &[0, 1, 2, 3, 4, 5], &PrintOptions::default());
/// assert_eq!(text, "[[0, 1, 2],\n [3, 4, 5]]");
/// ```
pub fn describe<T: Display>(shape: &[usize], scalars: &[T], options: &PrintOptions) -> String {
    let rendered: Vec<String> = scalars.iter().map(ToString::to_string).collect();
    let width = rendered.iter().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    render(&mut out, shape, &rendered, width, 0, options);
    out
}

fn render(
    out: &mut String,
    shape: &[usize],
    scalars: &[String],
    width: usize,
    depth: usize,
    options: &PrintOptions,
) {
    let Some((&size, inner)) = shape.split_first() else {
        out.push_str(&format!("{:>width$}", scalars[0], width = width));
        return;
    };
    let block: usize = inner.iter().product();
    let visible = options.visible(size);

    out.push('[');
    if inner.is_empty() {
        let indent = depth + 1;
        let mut column = indent;
        for (n, position) in visible.iter().enumerate() {
            let item = match position {
                Some(i) => format!("{:>width$}", scalars[*i], width = width),
                None => "...".to_string(),
            };
            if n > 0 {
                if column + 2 + item.len() + 1 > options.line_width {
                    out.push_str(",\n");
                    out.push_str(&" ".repeat(indent));
                    column = indent;
                } else {
                    out.push_str(", ");
                    column += 2;
                }
            }
            out.push_str(&item);
            column += item.len();
        }
    } else {
        let separator = format!(",\n{}{}", "\n".repeat(inner.len() - 1), " ".repeat(depth + 1));
        for (n, position) in visible.iter().enumerate() {
            if n > 0 {
                out.push_str(&separator);
            }
            match position {
                Some(i) => render(
                    out,
                    inner,
                    &scalars[i * block..(i + 1) * block],
                    width,
                    depth + 1,
                    options,
                ),
                None => out.push_str("..."),
            }
        }
    }
    out.push(']');
}
