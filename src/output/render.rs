//! Console rendering of listings

use crate::forum::Category;
use crate::types::Record;
use std::fmt::Write;

const NA: &str = "N/A";

/// Sections of a post: heading, then `(label, field, default)` rows
const POST_SECTIONS: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "Basic Information",
        &[
            ("Title", "title", NA),
            ("Type", "typeLabel", NA),
            ("Status", "postStatus", NA),
            ("URL", "url", NA),
        ],
    ),
    (
        "Author Information",
        &[
            ("Name", "author.name", NA),
            ("Handle", "author.handle", NA),
            ("Role", "author.role", NA),
            ("Label", "author.label", NA),
            ("User Key", "author.userKey", NA),
        ],
    ),
    (
        "Dates",
        &[("Posted", "posted", NA), ("Last Active", "active", NA)],
    ),
    (
        "Statistics",
        &[
            ("Replies", "replyCount", "0"),
            ("Likes", "likeCount", "0"),
            ("Views", "viewCount", "0"),
            ("Followers", "followCount", "0"),
        ],
    ),
    (
        "Keys",
        &[("Post Key", "postKey", NA), ("Parent Key", "parentKey", NA)],
    ),
];

/// Render one post as labelled sections followed by a separator line
pub fn render_post_details(post: &Record) -> String {
    let mut out = String::new();
    for (heading, rows) in POST_SECTIONS {
        let _ = writeln!(out, "\n{heading}:");
        for (label, field, default) in *rows {
            let _ = writeln!(out, "{label}: {}", post.get_or(field, default));
        }
    }
    out.push_str(&"-".repeat(50));
    out
}

/// Banner printed before the posts of a category
pub fn render_category_header(category: &Category) -> String {
    let rule = "=".repeat(80);
    format!(
        "\n{rule}\nCategory: {}\nPath: {}\n{rule}",
        category.name, category.path
    )
}

/// One line of the category listing
pub fn render_category_line(category: &Category) -> String {
    format!(
        "Name: {}, Type: {}, Key: {}",
        category.name,
        category.kind,
        category.key.as_deref().unwrap_or(NA)
    )
}
