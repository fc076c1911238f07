//! Authentication: bearer tokens resolved to a [`Principal`].

pub mod extractor;
pub mod guard;
pub mod jwt;
pub mod layer;
pub mod types;

pub use extractor::Auth;
pub use guard::AccessGuard;
pub use jwt::{decode_token, encode_token, TokenDecoder, TokenIssuer};
pub use layer::{AuthLayer, AuthMiddleware};
pub use types::{Claims, Principal};
