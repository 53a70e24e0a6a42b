/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub fn empty_attr() -> Attr {
    (String::new(), vec![], vec![])
}

/// `(identifier, classes, key-value attributes)`, in Pandoc's order.
///
/// Key-value pairs stay a list: Pandoc allows a key to repeat.
pub type Attr = (String, Vec<String>, Vec<(String, String)>);
