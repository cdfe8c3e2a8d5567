/// Open Packaging Conventions (OPC) layer.
///
/// Both Office formats handled by this crate are ZIP archives of XML parts
/// tied together by relationship parts and a content-types declaration. This
/// module covers that shared container:
///
/// - Physical ZIP access with deterministic member order on write
/// - Part naming (`PackURI`) and relationship target resolution
/// - `[Content_Types].xml` and `.rels` generation
/// - Main-part discovery through the package relationships
pub mod constants;
pub mod content_types;
pub mod error;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

pub use content_types::ContentTypes;
pub use error::OpcError;
pub use packuri::PackURI;
pub use phys_pkg::{Compression, PhysPkgReader, PhysPkgWriter, WriterOptions};
pub use pkgreader::PackageReader;
pub use rel::{Relationship, Relationships};
