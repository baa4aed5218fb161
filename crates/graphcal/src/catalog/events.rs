//! Events, calendar views, and everything hanging off a single event.

use crate::{
    descriptor::{BodyMode, EndpointDescriptor, HttpMethod, ResponseShape},
    error::Result,
};

use super::{
    family::{Resource, Scope, Update},
    fields, odata,
};

/// `/events` on `scope`, plus the per-event subresources and actions.
pub(super) fn event_container(scope: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    let events = Resource {
        noun: "event",
        plural: "events",
        segment: "/events",
        key: "{event-id}",
        tag: "events",
        create: fields::event(true),
        update: Some(Update::returning(fields::event(false))),
        list_query: odata::list(),
    };
    let node = scope.nest(
        "event",
        &events.item_path(),
        format!("an event of {}", scope.label()),
    );
    events.build(scope, out)?;

    out.push(
        scope
            .endpoint("delta_event", HttpMethod::Get, "/events/microsoft.graph.delta()")?
            .summary(format!(
                "Get events added, deleted, or updated in {}",
                scope.label()
            ))
            .query(odata::windowed(false, odata::function()))
            .response(ResponseShape::Collection)
            .tag("events"),
    );

    event_node(&node, out)
}

/// `/calendarView` on `scope`, plus the per-occurrence subresources and
/// actions.
pub(super) fn calendar_view(scope: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    let label = scope.label();
    let tag = "calendar_view";

    out.push(
        scope
            .endpoint("list_calendar_view", HttpMethod::Get, "/calendarView")?
            .summary(format!(
                "Get the occurrences, exceptions, and single instances of events in a time range of {label}"
            ))
            .query(odata::windowed(true, odata::list()))
            .response(ResponseShape::Collection)
            .tag(tag),
    );
    out.push(
        scope
            .endpoint("count_calendar_view", HttpMethod::Get, "/calendarView/$count")?
            .summary(format!("Get the number of calendar view events of {label}"))
            .query(odata::windowed(true, odata::count_only()))
            .response(ResponseShape::Count)
            .tag(tag),
    );
    out.push(
        scope
            .endpoint(
                "delta_calendar_view",
                HttpMethod::Get,
                "/calendarView/microsoft.graph.delta()",
            )?
            .summary(format!(
                "Get calendar view events added, deleted, or updated in {label}"
            ))
            .query(odata::windowed(true, odata::function()))
            .response(ResponseShape::Collection)
            .tag(tag),
    );
    out.push(
        scope
            .endpoint("get_calendar_view", HttpMethod::Get, "/calendarView/{event-id}")?
            .summary(format!("Get one event of the calendar view of {label}"))
            .query(odata::windowed(false, odata::get()))
            .tag(tag),
    );

    let node = scope.nest(
        "calendar_view",
        "/calendarView/{event-id}",
        format!("a calendar view event of {label}"),
    );
    event_node(&node, out)
}

/// Attachments, open extensions, instances, and actions of one event.
fn event_node(node: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    let attachments = Resource {
        noun: "attachment",
        plural: "attachments",
        segment: "/attachments",
        key: "{attachment-id}",
        tag: "attachments",
        create: fields::attachment(),
        update: None,
        list_query: odata::list(),
    };
    attachments.build(node, out)?;
    out.push(
        node.endpoint(
            "attachment_create_upload_session",
            HttpMethod::Post,
            "/attachments/microsoft.graph.createUploadSession",
        )?
        .summary(format!(
            "Create an upload session for attaching a file larger than 3 MB to {}",
            node.label()
        ))
        .body(fields::upload_session())
        .tag("attachments"),
    );

    Resource {
        noun: "extension",
        plural: "open extensions",
        segment: "/extensions",
        key: "{extension-id}",
        tag: "extensions",
        create: fields::extension(),
        update: Some(Update::no_content(fields::extension())),
        list_query: odata::list(),
    }
    .build(node, out)?;

    instances(node, out)?;
    actions(node, out)
}

fn instances(node: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    let label = node.label();
    let tag = "instances";

    out.push(
        node.endpoint("list_instance", HttpMethod::Get, "/instances")?
            .summary(format!(
                "Get the occurrences and exceptions in a time range of {label}"
            ))
            .query(odata::windowed(true, odata::list()))
            .response(ResponseShape::Collection)
            .tag(tag),
    );
    out.push(
        node.endpoint("count_instance", HttpMethod::Get, "/instances/$count")?
            .summary(format!("Get the number of instances of {label}"))
            .query(odata::count_only())
            .response(ResponseShape::Count)
            .tag(tag),
    );
    out.push(
        node.endpoint(
            "delta_instance",
            HttpMethod::Get,
            "/instances/microsoft.graph.delta()",
        )?
        .summary(format!(
            "Get instances added, deleted, or updated in {label}"
        ))
        .query(odata::windowed(false, odata::function()))
        .response(ResponseShape::Collection)
        .tag(tag),
    );
    out.push(
        node.endpoint("get_instance", HttpMethod::Get, "/instances/{event-id1}")?
            .summary(format!("Get one instance of {label}"))
            .query(odata::windowed(false, odata::get()))
            .tag(tag),
    );
    Ok(())
}

fn actions(node: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    let label = node.label();
    let table: [(&str, &str, String, BodyMode); 8] = [
        (
            "accept",
            "accept",
            format!("Accept {label}"),
            fields::meeting_response(false),
        ),
        (
            "decline",
            "decline",
            format!("Decline an invitation to {label}"),
            fields::meeting_response(true),
        ),
        (
            "tentatively_accept",
            "tentativelyAccept",
            format!("Tentatively accept {label}"),
            fields::meeting_response(true),
        ),
        (
            "cancel",
            "cancel",
            format!("Cancel {label} and notify attendees (organizer only)"),
            fields::cancel(),
        ),
        (
            "forward",
            "forward",
            format!("Forward {label} to other recipients"),
            fields::forward(),
        ),
        (
            "dismiss_reminder",
            "dismissReminder",
            format!("Dismiss the reminder of {label}"),
            BodyMode::None,
        ),
        (
            "snooze_reminder",
            "snoozeReminder",
            format!("Postpone the reminder of {label} until a new time"),
            fields::snooze_reminder(),
        ),
        (
            "permanent_delete",
            "permanentDelete",
            format!("Permanently delete {label} and place it in the Purges folder"),
            BodyMode::None,
        ),
    ];

    for (name, action, summary, body) in table {
        out.push(
            node.endpoint(
                name,
                HttpMethod::Post,
                &format!("/microsoft.graph.{action}"),
            )?
            .summary(summary)
            .body(body)
            .response(ResponseShape::Empty)
            .tag("actions"),
        );
    }
    Ok(())
}
