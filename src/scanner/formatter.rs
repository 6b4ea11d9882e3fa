use super::walker::TreeListing;

/// Format a listing as a tree string
pub fn format_listing(listing: &TreeListing) -> String {
    let mut output = String::new();
    format_listing_recursive(listing, &mut output, "", true, 0);
    output
}

fn format_listing_recursive(
    listing: &TreeListing,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
) {
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let name = if depth == 0 {
        listing.entry.path.display().to_string()
    } else if listing.entry.is_dir() {
        format!("{}/", listing.entry.name)
    } else {
        listing.entry.name.clone()
    };

    let error_indicator = if listing.error.is_some() { " [!]" } else { "" };

    output.push_str(&format!("{}{}{}{}\n", prefix, connector, name, error_indicator));

    let new_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let count = listing.children.len();
    for (i, child) in listing.children.iter().enumerate() {
        format_listing_recursive(child, output, &new_prefix, i == count - 1, depth + 1);
    }
}

/// Count files (not directories) in a listing.
pub fn count_files(listing: &TreeListing) -> usize {
    let own = usize::from(listing.entry.is_file());
    own + listing.children.iter().map(count_files).sum::<usize>()
}
