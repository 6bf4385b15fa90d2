//! IMAP protocol parser.
//!
//! A sans-I/O parser for IMAP server responses, split into a byte lexer and
//! a response parser. The framed stream hands it one complete response at a
//! time, literals already inlined.
//!
//! # Example
//!
//! ```
//! use invoicebox_imap::parser::{Response, ResponseParser, UntaggedResponse};
//!
//! let input = b"* OK IMAP4rev1 server ready\r\n";
//! let response = ResponseParser::parse(input).unwrap();
//!
//! match response {
//!     Response::Untagged(UntaggedResponse::Ok { text, .. }) => {
//!         assert!(text.contains("ready"));
//!     }
//!     _ => panic!("Expected untagged OK"),
//! }
//! ```

pub mod lexer;
pub mod response;

pub use lexer::{Lexer, Token};
pub use response::{FetchItem, Response, ResponseCode, ResponseParser, Status, UntaggedResponse};
