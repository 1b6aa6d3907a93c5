//! REST resource descriptors.
//!
//! A [`RestResource`] is built once from a resource name and URL template
//! and knows how to turn positional path arguments into [`HttpRequest`]s
//! for each operation it exposes:
//!
//! | Operation | Method   | Path              | Arguments                     |
//! |-----------|----------|-------------------|-------------------------------|
//! | list      | `GET`    | collection path   | required arguments            |
//! | detail    | `GET`    | object path       | required arguments and object |
//! | create    | `PUT`    | collection path   | required arguments, data      |
//! | update    | `POST`   | object path       | required arguments and object, data |
//! | delete    | `DELETE` | object path       | required arguments and object |
//!
//! Extra views are additional sub-paths (`/children`, `/status`) appended to
//! either the collection path or the object path.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::{ExtraView, ResourceOperation, RestResource};
//! use serde_json::json;
//!
//! let devices = RestResource::builder("device", "/accounts/{account_id}/devices/{device_id}")
//!     .extra_view(ExtraView::new("get_all_devices_status", "status"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(devices.method_name(ResourceOperation::List), "get_devices");
//!
//! let request = devices.update_request(&["acc1", "dev1"], json!({"enabled": false})).unwrap();
//! assert_eq!(request.path, "/accounts/acc1/devices/dev1");
//!
//! let request = devices.extra_view_request("get_all_devices_status", &["acc1"], None).unwrap();
//! assert_eq!(request.path, "/accounts/acc1/devices/status");
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::{HttpMethod, HttpRequest, InvalidHttpRequestError, RequestBody};
use crate::error::ConfigError;
use crate::rest::path::{build_path, collection_template, parse_placeholders, ResourceOperation};

/// Whether an extra view hangs off the collection path or an object path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewScope {
    /// `{collection}/{view}`; takes the required arguments.
    Aggregate,
    /// `{collection}/{object}/{view}`; also takes the object argument.
    Object,
}

/// An additional sub-path exposed by a resource.
///
/// Defaults to [`ViewScope::Aggregate`] and `GET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraView {
    name: String,
    path: String,
    scope: ViewScope,
    method: HttpMethod,
}

impl ExtraView {
    /// Creates a view with an explicit method name.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            scope: ViewScope::Aggregate,
            method: HttpMethod::Get,
        }
    }

    /// Creates a view named `get_<path>`.
    ///
    /// ```rust
    /// use kazoo_api::rest::ExtraView;
    ///
    /// assert_eq!(ExtraView::from_path("hotdesks").name(), "get_hotdesks");
    /// ```
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(format!("get_{path}"), path)
    }

    /// Sets the scope.
    #[must_use]
    pub const fn scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns the generated method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sub-path appended to the collection or object path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the view's scope.
    #[must_use]
    pub const fn view_scope(&self) -> ViewScope {
        self.scope
    }

    /// Returns the view's HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.method
    }
}

/// Describes one Kazoo REST resource.
///
/// Built with [`RestResource::builder`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResource {
    name: String,
    plural_name: String,
    template: String,
    collection_path: String,
    required_args: Vec<String>,
    object_arg: String,
    operations: Vec<ResourceOperation>,
    method_names: HashMap<ResourceOperation, String>,
    extra_views: Vec<ExtraView>,
}

impl RestResource {
    /// Creates a builder for a resource with the given name and URL template.
    #[must_use]
    pub fn builder(name: impl Into<String>, template: impl Into<String>) -> RestResourceBuilder {
        RestResourceBuilder::new(name, template)
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the plural name used for list method names.
    #[must_use]
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Returns the URL template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the collection path template.
    #[must_use]
    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// Returns the placeholders before the object placeholder.
    #[must_use]
    pub fn required_args(&self) -> &[String] {
        &self.required_args
    }

    /// Returns the last placeholder, identifying one object.
    #[must_use]
    pub fn object_arg(&self) -> &str {
        &self.object_arg
    }

    /// Returns the supported operations, in declaration order.
    #[must_use]
    pub fn operations(&self) -> &[ResourceOperation] {
        &self.operations
    }

    /// Returns `true` if the resource exposes the operation.
    #[must_use]
    pub fn supports(&self, operation: ResourceOperation) -> bool {
        self.operations.contains(&operation)
    }

    /// Returns the extra views.
    #[must_use]
    pub fn extra_views(&self) -> &[ExtraView] {
        &self.extra_views
    }

    /// Returns the extra view with the given method name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownExtraView`] if no view has that name.
    pub fn extra_view(&self, name: &str) -> Result<&ExtraView, ConfigError> {
        self.extra_views
            .iter()
            .find(|view| view.name == name)
            .ok_or_else(|| ConfigError::UnknownExtraView {
                resource: self.name.clone(),
                view: name.to_string(),
            })
    }

    /// Returns the method name generated for an operation.
    ///
    /// Defaults are `get_<plural>` for list and `<op>_<name>` otherwise,
    /// with `get` standing in for detail.
    #[must_use]
    pub fn method_name(&self, operation: ResourceOperation) -> &str {
        self.method_names
            .get(&operation)
            .map_or("", String::as_str)
    }

    /// Returns the path parameter names an operation takes, in order.
    #[must_use]
    pub fn parameters(&self, operation: ResourceOperation) -> Vec<&str> {
        self.parameters_for(operation.targets_object())
    }

    /// Returns the path parameter names an extra view takes, in order.
    #[must_use]
    pub fn view_parameters(&self, view: &ExtraView) -> Vec<&str> {
        self.parameters_for(view.scope == ViewScope::Object)
    }

    fn parameters_for(&self, object: bool) -> Vec<&str> {
        let mut params: Vec<&str> = self.required_args.iter().map(String::as_str).collect();
        if object {
            params.push(&self.object_arg);
        }
        params
    }

    /// Builds the list request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if list is unsupported or the argument count is wrong.
    pub fn list_request(&self, args: &[&str]) -> Result<HttpRequest, ConfigError> {
        self.operation_request(ResourceOperation::List, args, None)
    }

    /// Builds the detail request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if detail is unsupported or the argument count is wrong.
    pub fn object_request(&self, args: &[&str]) -> Result<HttpRequest, ConfigError> {
        self.operation_request(ResourceOperation::Detail, args, None)
    }

    /// Builds the create request, wrapping `data` in the request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if create is unsupported or the argument count is wrong.
    pub fn create_request(&self, args: &[&str], data: Value) -> Result<HttpRequest, ConfigError> {
        self.operation_request(ResourceOperation::Create, args, Some(data))
    }

    /// Builds the update request, wrapping `data` in the request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if update is unsupported or the argument count is wrong.
    pub fn update_request(&self, args: &[&str], data: Value) -> Result<HttpRequest, ConfigError> {
        self.operation_request(ResourceOperation::Update, args, Some(data))
    }

    /// Builds the delete request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if delete is unsupported or the argument count is wrong.
    pub fn delete_request(&self, args: &[&str]) -> Result<HttpRequest, ConfigError> {
        self.operation_request(ResourceOperation::Delete, args, None)
    }

    /// Builds the request for an extra view.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownExtraView`] if the view does not exist,
    /// or [`ConfigError::ArgumentCount`] if the argument count is wrong.
    pub fn extra_view_request(
        &self,
        name: &str,
        args: &[&str],
        data: Option<Value>,
    ) -> Result<HttpRequest, ConfigError> {
        let view = self.extra_view(name)?;
        let base = self.resolve(view.scope == ViewScope::Object, args)?;
        self.request(view.method, format!("{base}/{}", view.path), data)
    }

    fn operation_request(
        &self,
        operation: ResourceOperation,
        args: &[&str],
        data: Option<Value>,
    ) -> Result<HttpRequest, ConfigError> {
        if !self.supports(operation) {
            return Err(ConfigError::UnsupportedOperation {
                resource: self.name.clone(),
                operation: operation.as_str(),
            });
        }
        let path = self.resolve(operation.targets_object(), args)?;
        self.request(operation.http_method(), path, data)
    }

    /// Substitutes positional arguments into the collection or object path.
    fn resolve(&self, object: bool, args: &[&str]) -> Result<String, ConfigError> {
        let expected = self.required_args.len() + usize::from(object);
        if args.len() != expected {
            return Err(ConfigError::ArgumentCount {
                resource: self.name.clone(),
                expected,
                got: args.len(),
            });
        }

        let ids: Vec<(&str, &str)> = self
            .required_args
            .iter()
            .map(String::as_str)
            .zip(args.iter().copied())
            .collect();
        let collection = build_path(&self.collection_path, &ids);

        Ok(match args.get(self.required_args.len()) {
            Some(object_id) if object => {
                format!("{collection}/{}", urlencoding::encode(object_id))
            }
            _ => collection,
        })
    }

    fn request(
        &self,
        method: HttpMethod,
        path: String,
        data: Option<Value>,
    ) -> Result<HttpRequest, ConfigError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(data) = data {
            builder = builder.body(RequestBody::envelope(data));
        }
        builder
            .build()
            .map_err(|_: InvalidHttpRequestError| ConfigError::MalformedTemplate {
                template: self.template.clone(),
            })
    }
}

/// Builder for [`RestResource`] descriptors.
///
/// # Defaults
///
/// - `plural_name`: the name followed by `s`
/// - operations: all five
/// - method names: `get_<plural>`, `get_<name>`, `create_<name>`,
///   `update_<name>`, `delete_<name>`
/// - no extra views
#[derive(Debug)]
pub struct RestResourceBuilder {
    name: String,
    template: String,
    plural_name: Option<String>,
    operations: Option<Vec<ResourceOperation>>,
    excluded: Vec<ResourceOperation>,
    method_names: HashMap<ResourceOperation, String>,
    extra_views: Vec<ExtraView>,
}

impl RestResourceBuilder {
    fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            plural_name: None,
            operations: None,
            excluded: Vec::new(),
            method_names: HashMap::new(),
            extra_views: Vec::new(),
        }
    }

    /// Overrides the plural name.
    #[must_use]
    pub fn plural_name(mut self, plural: impl Into<String>) -> Self {
        self.plural_name = Some(plural.into());
        self
    }

    /// Restricts the resource to the given operations.
    #[must_use]
    pub fn operations(mut self, operations: &[ResourceOperation]) -> Self {
        self.operations = Some(operations.to_vec());
        self
    }

    /// Removes operations from the supported set.
    #[must_use]
    pub fn exclude_operations(mut self, operations: &[ResourceOperation]) -> Self {
        self.excluded.extend_from_slice(operations);
        self
    }

    /// Overrides the generated method name of one operation.
    #[must_use]
    pub fn method_name(mut self, operation: ResourceOperation, name: impl Into<String>) -> Self {
        self.method_names.insert(operation, name.into());
        self
    }

    /// Adds an extra view.
    #[must_use]
    pub fn extra_view(mut self, view: ExtraView) -> Self {
        self.extra_views.push(view);
        self
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedTemplate`] or [`ConfigError::NoPathParameters`]
    ///   if the template cannot be parsed
    pub fn build(self) -> Result<RestResource, ConfigError> {
        let mut placeholders = parse_placeholders(&self.template)?;
        let collection_path = collection_template(&self.template)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::NoPathParameters {
                template: self.template.clone(),
            })?;
        let object_arg = placeholders
            .pop()
            .ok_or_else(|| ConfigError::NoPathParameters {
                template: self.template.clone(),
            })?;

        let plural_name = self
            .plural_name
            .unwrap_or_else(|| format!("{}s", self.name));

        let operations: Vec<ResourceOperation> = self
            .operations
            .unwrap_or_else(|| ResourceOperation::ALL.to_vec())
            .into_iter()
            .filter(|op| !self.excluded.contains(op))
            .collect();

        let mut method_names = self.method_names;
        for operation in ResourceOperation::ALL {
            method_names
                .entry(operation)
                .or_insert_with(|| match operation {
                    ResourceOperation::List => format!("get_{plural_name}"),
                    ResourceOperation::Detail => format!("get_{}", self.name),
                    other => format!("{}_{}", other.as_str(), self.name),
                });
        }

        Ok(RestResource {
            name: self.name,
            plural_name,
            template: self.template,
            collection_path,
            required_args: placeholders,
            object_arg,
            operations,
            method_names,
            extra_views: self.extra_views,
        })
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestResource>();
    assert_send_sync::<ExtraView>();
};
