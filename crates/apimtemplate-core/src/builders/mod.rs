//! Builders turning the OpenAPI source model into operation templates.
//!
//! [`OperationTemplateCreator`] walks every path and method of a document and
//! delegates to the request, response, representation and parameter builders.
//! All builders are pure; each operation is converted independently of the
//! others.
pub mod examples;
pub mod operation;
pub mod parameters;
pub mod representations;

pub use examples::ExampleValues;
pub use operation::{
    create_operation_request, create_operation_responses, ConversionReport,
    OperationTemplateCreator,
};
pub use parameters::{
    map_form_parameters, map_headers, map_parameter, map_parameters, ParameterSource,
};
pub use representations::{is_form_content_type, map_representations};

use crate::openapi::HttpMethod;
use crate::Error;

/// The operation being converted, used to locate malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationLocation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
}

impl OperationLocation<'_> {
    pub fn malformed<R: Into<String>>(&self, reason: R) -> Error {
        Error::malformed(self.path, self.method.as_str(), reason)
    }
}
