//! The `rest_resources!` macro that turns resource descriptors into client methods.
//!
//! Each entry of the table names a static, the descriptor's constructor
//! arguments and builder calls, the Rust identifiers of its path parameters
//! and one line per generated method:
//!
//! ```rust,ignore
//! rest_resources! {
//!     /// Callflows.
//!     CALLFLOWS = ("callflow", "/accounts/{account_id}/callflows/{callflow_id}") {
//!         args: [account_id], object: callflow_id;
//!         list get_callflows;
//!         detail get_callflow;
//!         create create_callflow;
//!         update update_callflow;
//!         delete delete_callflow;
//!     }
//! }
//! ```
//!
//! Extra views are declared as `view <name>;`, `view <name>(object);`,
//! `view <name>(data);` or `view <name>(object, data);`.
//!
//! The macro emits a lazily built descriptor per entry, the `pub async fn`
//! methods on [`KazooClient`](crate::KazooClient), and the registry
//! functions `resources()` and `generated_methods()`. The registry lets
//! tests check that every declared parameter list and method name agrees
//! with the descriptor parsed from the template.

use std::sync::LazyLock;

use crate::error::ConfigError;
use crate::rest::path::ResourceOperation;
use crate::rest::resource::RestResource;

/// A descriptor built on first use.
pub type ResourceCell = LazyLock<Result<RestResource, ConfigError>>;

/// Returns the descriptor held by a cell.
///
/// # Errors
///
/// Returns the [`ConfigError`] the descriptor failed to build with.
pub fn resolve(cell: &'static ResourceCell) -> Result<&'static RestResource, ConfigError> {
    LazyLock::force(cell).as_ref().map_err(Clone::clone)
}

/// What a generated method does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// One of the five CRUD operations.
    Operation(ResourceOperation),
    /// An extra view, identified by the method name.
    View,
}

/// Registry record of one generated client method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMethod {
    /// Name of the static holding the descriptor.
    pub resource: &'static str,
    /// The method name.
    pub name: &'static str,
    /// The operation or view the method calls.
    pub kind: MethodKind,
    /// The path parameter names, in order.
    pub params: Vec<&'static str>,
    /// Whether the method takes a trailing `data` argument.
    pub takes_data: bool,
}

macro_rules! rest_resources {
    (
        $(
            $(#[$meta:meta])*
            $cell:ident = ($name:literal, $template:literal)
                $(.$setter:ident($($setter_arg:expr),* $(,)?))*
            {
                args: [$($arg:ident),*], object: $object:ident;
                $($ops:tt)*
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            pub static $cell: $crate::rest::ResourceCell = $crate::rest::ResourceCell::new(|| {
                $crate::rest::RestResource::builder($name, $template)
                    $(.$setter($($setter_arg),*))*
                    .build()
            });

            impl $crate::KazooClient {
                rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($ops)*);
            }
        )*

        /// Returns every resource descriptor cell with the name of its static.
        #[must_use]
        pub fn resources() -> Vec<(&'static str, &'static $crate::rest::ResourceCell)> {
            vec![$((stringify!($cell), &$cell)),*]
        }

        /// Returns a registry record for every generated client method.
        #[must_use]
        pub fn generated_methods() -> Vec<$crate::rest::GeneratedMethod> {
            let mut methods = Vec::new();
            $(
                rest_resources!(@entries methods, $cell, [$($arg),*], $object; $($ops)*);
            )*
            methods
        }
    };

    // Client methods, one per operation line.
    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;) => {};

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        list $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Lists every `", $name, "`: `GET` on the collection of `", $template, "`.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str),*) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?.list_request(&[$($arg),*])?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        detail $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Fetches one `", $name, "`: `GET ", $template, "`.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* $object: &str) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?.object_request(&[$($arg,)* $object])?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        create $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Creates a `", $name, "`: `PUT` on the collection of `", $template, "`.")]
        #[doc = ""]
        #[doc = "`data` is sent wrapped in the `{\"data\": ...}` request envelope."]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* data: serde_json::Value) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?.create_request(&[$($arg),*], data)?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        update $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Updates a `", $name, "`: `POST ", $template, "`.")]
        #[doc = ""]
        #[doc = "`data` is sent wrapped in the `{\"data\": ...}` request envelope."]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* $object: &str, data: serde_json::Value) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?.update_request(&[$($arg,)* $object], data)?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        delete $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Deletes a `", $name, "`: `DELETE ", $template, "`.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* $object: &str) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?.delete_request(&[$($arg,)* $object])?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        view $method:ident; $($rest:tt)*) => {
        #[doc = concat!("Calls the `", stringify!($method), "` view on the collection of `", $template, "`.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str),*) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?
                .extra_view_request(stringify!($method), &[$($arg),*], None)?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        view $method:ident(object); $($rest:tt)*) => {
        #[doc = concat!("Calls the `", stringify!($method), "` view of one `", $name, "` (`", $template, "`).")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* $object: &str) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?
                .extra_view_request(stringify!($method), &[$($arg,)* $object], None)?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        view $method:ident(data); $($rest:tt)*) => {
        #[doc = concat!("Calls the `", stringify!($method), "` view on the collection of `", $template, "`.")]
        #[doc = ""]
        #[doc = "`data` is sent wrapped in the `{\"data\": ...}` request envelope."]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* data: serde_json::Value) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?
                .extra_view_request(stringify!($method), &[$($arg),*], Some(data))?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    (@methods $cell:ident, $name:literal, $template:literal, [$($arg:ident),*], $object:ident;
        view $method:ident(object, data); $($rest:tt)*) => {
        #[doc = concat!("Calls the `", stringify!($method), "` view of one `", $name, "` (`", $template, "`).")]
        #[doc = ""]
        #[doc = "`data` is sent wrapped in the `{\"data\": ...}` request envelope."]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ClientError`](crate::ClientError) if the request fails."]
        pub async fn $method(&self, $($arg: &str,)* $object: &str, data: serde_json::Value) -> Result<serde_json::Value, $crate::ClientError> {
            let request = $crate::rest::resolve(&$cell)?
                .extra_view_request(stringify!($method), &[$($arg,)* $object], Some(data))?;
            self.execute(request).await
        }
        rest_resources!(@methods $cell, $name, $template, [$($arg),*], $object; $($rest)*);
    };

    // Registry records, one per operation line.
    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;) => {};

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        list $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, Operation(List), [$(stringify!($arg)),*], false);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        detail $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, Operation(Detail), [$(stringify!($arg),)* stringify!($object)], false);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        create $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, Operation(Create), [$(stringify!($arg)),*], true);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        update $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, Operation(Update), [$(stringify!($arg),)* stringify!($object)], true);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        delete $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, Operation(Delete), [$(stringify!($arg),)* stringify!($object)], false);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        view $method:ident; $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, View, [$(stringify!($arg)),*], false);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        view $method:ident(object); $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, View, [$(stringify!($arg),)* stringify!($object)], false);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        view $method:ident(data); $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, View, [$(stringify!($arg)),*], true);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@entries $out:ident, $cell:ident, [$($arg:ident),*], $object:ident;
        view $method:ident(object, data); $($rest:tt)*) => {
        rest_resources!(@record $out, $cell, $method, View, [$(stringify!($arg),)* stringify!($object)], true);
        rest_resources!(@entries $out, $cell, [$($arg),*], $object; $($rest)*);
    };

    (@record $out:ident, $cell:ident, $method:ident, Operation($op:ident), [$($param:expr),*], $data:literal) => {
        $out.push($crate::rest::GeneratedMethod {
            resource: stringify!($cell),
            name: stringify!($method),
            kind: $crate::rest::MethodKind::Operation($crate::rest::ResourceOperation::$op),
            params: vec![$($param),*],
            takes_data: $data,
        });
    };

    (@record $out:ident, $cell:ident, $method:ident, View, [$($param:expr),*], $data:literal) => {
        $out.push($crate::rest::GeneratedMethod {
            resource: stringify!($cell),
            name: stringify!($method),
            kind: $crate::rest::MethodKind::View,
            params: vec![$($param),*],
            takes_data: $data,
        });
    };
}

pub(crate) use rest_resources;
