//! Document construction macro.

/// Builds a [`Document`](crate::Document) from literal key/value pairs,
/// in order.
///
/// ```
/// use bson_core::doc;
///
/// let d = doc! { "name": "ada", "count": 3 };
/// assert_eq!(d.keys().collect::<Vec<_>>(), ["name", "count"]);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::Document::new()
    };
    ($($key:tt : $value:expr),+ $(,)?) => {{
        let mut doc = $crate::Document::new();
        $( doc.set($key, $value); )+
        doc
    }};
}
