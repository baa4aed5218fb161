//! Building blocks for composing descriptors from resource families.

use crate::{
    descriptor::{BodyMode, EndpointDescriptor, HttpMethod, QueryParam, ResponseShape},
    error::Result,
};

use super::odata;

/// A path prefix that owns resources, e.g. `/users/{user-id}/calendar`.
///
/// The owner is the tool-name prefix (`user_calendar`) and the label is the
/// phrase used in summaries ("the primary calendar of a user").
#[derive(Debug, Clone)]
pub(super) struct Scope {
    owner: String,
    base: String,
    label: String,
}

impl Scope {
    pub(super) fn new(owner: &str, base: &str, label: &str) -> Self {
        Self {
            owner: owner.to_string(),
            base: base.to_string(),
            label: label.to_string(),
        }
    }

    /// A scope below this one. `owner` is appended to the tool-name prefix
    /// and `path` to the base path.
    pub(super) fn nest(&self, owner: &str, path: &str, label: String) -> Self {
        Self {
            owner: format!("{}_{owner}", self.owner),
            base: format!("{}{path}", self.base),
            label,
        }
    }

    pub(super) fn label(&self) -> &str {
        &self.label
    }

    /// Starts a descriptor named `{owner}_{name}` at `{base}{path}`.
    pub(super) fn endpoint(
        &self,
        name: &str,
        method: HttpMethod,
        path: &str,
    ) -> Result<EndpointDescriptor> {
        EndpointDescriptor::new(
            format!("{}_{name}", self.owner),
            method,
            &format!("{}{path}", self.base),
        )
    }
}

/// The `PATCH` of a [`Resource`] item.
pub(super) struct Update {
    pub body: BodyMode,
    pub response: ResponseShape,
}

impl Update {
    /// Graph answers with the updated entity.
    pub(super) fn returning(body: BodyMode) -> Self {
        Self {
            body,
            response: ResponseShape::Resource,
        }
    }

    /// Graph answers with `204 No Content`.
    pub(super) fn no_content(body: BodyMode) -> Self {
        Self {
            body,
            response: ResponseShape::Empty,
        }
    }
}

/// An entity collection with the standard list/create/count/get/update/delete
/// operations.
pub(super) struct Resource {
    /// Singular noun in tool names (`event`, `calendar_permission`).
    pub noun: &'static str,
    /// Plural phrase in summaries.
    pub plural: &'static str,
    /// Collection segment (`/events`).
    pub segment: &'static str,
    /// Item key placeholder (`{event-id}`).
    pub key: &'static str,
    pub tag: &'static str,
    pub create: BodyMode,
    /// `None` when the resource cannot be updated in place.
    pub update: Option<Update>,
    pub list_query: Vec<QueryParam>,
}

impl Resource {
    /// Path of a single item relative to the owning scope.
    pub(super) fn item_path(&self) -> String {
        format!("{}/{}", self.segment, self.key)
    }

    /// Appends the collection operations on `scope` to `out`.
    pub(super) fn build(self, scope: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
        let item = self.item_path();
        let Self {
            noun,
            plural,
            segment,
            tag,
            create,
            update,
            list_query,
            ..
        } = self;
        let label = scope.label();

        out.push(
            scope
                .endpoint(&format!("list_{noun}"), HttpMethod::Get, segment)?
                .summary(format!("List {plural} of {label}"))
                .query(list_query)
                .response(ResponseShape::Collection)
                .tag(tag),
        );
        out.push(
            scope
                .endpoint(&format!("create_{noun}"), HttpMethod::Post, segment)?
                .summary(format!("Create new {plural} in {label}"))
                .body(create)
                .tag(tag),
        );
        out.push(
            scope
                .endpoint(&format!("count_{noun}"), HttpMethod::Get, &format!("{segment}/$count"))?
                .summary(format!("Get the number of {plural} of {label}"))
                .query(odata::count_only())
                .response(ResponseShape::Count)
                .tag(tag),
        );
        out.push(
            scope
                .endpoint(&format!("get_{noun}"), HttpMethod::Get, &item)?
                .summary(format!("Get one of the {plural} of {label}"))
                .query(odata::get())
                .tag(tag),
        );
        if let Some(update) = update {
            out.push(
                scope
                    .endpoint(&format!("update_{noun}"), HttpMethod::Patch, &item)?
                    .summary(format!("Update one of the {plural} of {label}"))
                    .body(update.body)
                    .response(update.response)
                    .tag(tag),
            );
        }
        out.push(
            scope
                .endpoint(&format!("delete_{noun}"), HttpMethod::Delete, &item)?
                .summary(format!("Delete one of the {plural} of {label}"))
                .response(ResponseShape::Empty)
                .tag(tag),
        );
        Ok(())
    }
}
