pub mod config;
pub mod decode;
pub mod error;
pub mod multipart;
pub mod stream;
pub mod traits;
pub mod transport;

pub use config::{ApiKey, ClientConfig};
pub use decode::{decode_response, parse_json};
pub use error::{ApiError, Error};
pub use multipart::{EncodedForm, FILE_FIELDS, MultipartWriter, encode_form};
pub use stream::stream_response;
pub use traits::{Create, Delete, List, Retrieve};
pub use transport::{HttpTransport, RequestDescriptor, Transport};
