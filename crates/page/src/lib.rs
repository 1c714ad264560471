//! Parse markup into a styled, laid-out document.
//!
//! ```
//! let doc = page::parse_document(
//!     "<style>div { display: flex; width: 500 } p { flex: 1 }</style><div><p></p></div>",
//! )
//! .expect("well-formed");
//! let p = html::traverse::elements_by_tag_name(&doc, "p")[0];
//! assert_eq!(doc.layout_box(p).map(|r| r.width), Some(500.0));
//! ```

mod error;
mod session;

pub use error::PageError;
pub use session::{ParseConfig, ParseSession, SessionStats, parse_document, parse_document_with};
