use std::collections::HashMap;

/// Field name -> client-facing message
pub type FieldErrors = HashMap<String, String>;
