error_chain! {
    foreign_links {
        Io(std::io::Error);
        Http(reqwest::Error);
        Hyper(hyper::Error);
        Prometheus(prometheus::Error);
    }

    errors {
        HttpStatus(code: u16) {
            description("station API answered with an error status")
            display("station API answered with HTTP status {}", code)
        }
        MalformedPayload(detail: String) {
            description("payload is not valid JSON")
            display("payload is not valid JSON: {}", detail)
        }
        ShapeMismatch(found: String) {
            description("payload is not an array of station objects")
            display("expected an array of station objects, found {}", found)
        }
        FieldType(key: String, expected: &'static str) {
            description("field has the wrong JSON type")
            display("field `{}` should be {}", key, expected)
        }
    }
}

impl Error {
    /// True for the decode failures that no retry can fix.
    pub fn is_structural(&self) -> bool {
        match self.kind() {
            ErrorKind::MalformedPayload(_)
            | ErrorKind::ShapeMismatch(_)
            | ErrorKind::FieldType(..) => true,
            _ => false,
        }
    }
}
