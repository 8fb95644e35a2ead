//! Document, collection, and query types shared by store adapters.

mod codec;
mod document;
mod ids;
mod query;

pub use codec::{from_fields, to_fields};
pub use document::{CreatedDocument, Document, Fields};
pub use ids::{Collection, DocumentId};
pub use query::{Direction, DocumentQuery, Filter, OrderBy};
