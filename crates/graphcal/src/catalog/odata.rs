//! OData query parameter sets shared by the resource families.

use crate::descriptor::{QueryParam, ValueKind};

fn top() -> QueryParam {
    QueryParam::new("$top", ValueKind::Integer, "Show only the first n items")
}

fn skip() -> QueryParam {
    QueryParam::new("$skip", ValueKind::Integer, "Skip the first n items")
}

fn search() -> QueryParam {
    QueryParam::new("$search", ValueKind::String, "Search items by search phrases")
}

fn filter() -> QueryParam {
    QueryParam::new("$filter", ValueKind::String, "Filter items by property values")
}

fn count() -> QueryParam {
    QueryParam::new("$count", ValueKind::Boolean, "Include count of items")
}

fn orderby() -> QueryParam {
    QueryParam::new("$orderby", ValueKind::StringList, "Order items by property values")
}

fn select() -> QueryParam {
    QueryParam::new("$select", ValueKind::StringList, "Select properties to be returned")
}

fn expand() -> QueryParam {
    QueryParam::new("$expand", ValueKind::StringList, "Expand related entities")
}

/// Parameters of a collection `GET`.
pub(super) fn list() -> Vec<QueryParam> {
    vec![
        top(),
        skip(),
        search(),
        filter(),
        count(),
        orderby(),
        select(),
        expand(),
    ]
}

/// Parameters of a single-item `GET`.
pub(super) fn get() -> Vec<QueryParam> {
    vec![select(), expand()]
}

/// Parameters of a `/$count` request.
pub(super) fn count_only() -> Vec<QueryParam> {
    vec![search(), filter()]
}

/// Parameters of a `delta()` or other collection-valued function.
pub(super) fn function() -> Vec<QueryParam> {
    vec![top(), skip(), search(), filter(), count(), select(), orderby()]
}

/// The `startDateTime`/`endDateTime` window of calendar views and
/// instances, followed by `rest`.
pub(super) fn windowed(required: bool, rest: Vec<QueryParam>) -> Vec<QueryParam> {
    let bound = |wire: &str, description: &str| {
        let param = QueryParam::new(wire, ValueKind::String, description);
        if required { param.required() } else { param }
    };
    let mut params = vec![
        bound(
            "startDateTime",
            "Start of the time range, in ISO 8601 format (e.g. 2024-01-01T00:00:00Z)",
        ),
        bound(
            "endDateTime",
            "End of the time range, in ISO 8601 format (e.g. 2024-01-31T23:59:59Z)",
        ),
    ];
    params.extend(rest);
    params
}
