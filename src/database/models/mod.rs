pub mod author;
pub mod post;

pub use author::Author;
pub use post::{AuthorName, NewPost, Post, PostId, PostSummary, PostUpdate};
