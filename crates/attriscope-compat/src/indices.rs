use std::collections::BTreeSet;

/// Render a set of indices as the shortest ascending run list:
/// `{1,2,3,5,8,9,10}` becomes `"1-3, 5, 8-10"`. Runs of length one are
/// bare numbers; the empty set renders as the empty string.
pub fn condense(indices: &BTreeSet<u32>) -> String {
    let mut iter = indices.iter().copied();
    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut runs: Vec<String> = Vec::new();
    let (mut start, mut prev) = (first, first);
    for n in iter {
        if n == prev + 1 {
            prev = n;
        } else {
            runs.push(render_run(start, prev));
            start = n;
            prev = n;
        }
    }
    runs.push(render_run(start, prev));
    runs.join(", ")
}

fn render_run(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}
