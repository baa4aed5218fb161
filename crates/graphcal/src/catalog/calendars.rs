//! Calendars, calendar groups, and per-calendar operations.

use crate::{
    descriptor::{BodyMode, EndpointDescriptor, HttpMethod, ResponseShape},
    error::Result,
};

use super::{
    family::{Resource, Scope, Update},
    fields, odata,
};

fn calendars() -> Resource {
    Resource {
        noun: "calendar",
        plural: "calendars",
        segment: "/calendars",
        key: "{calendar-id}",
        tag: "calendars",
        create: fields::calendar(),
        update: Some(Update::returning(fields::calendar())),
        list_query: odata::list(),
    }
}

/// `/calendars` on `scope` (a user or a calendar group).
pub(super) fn calendar_collection(scope: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    calendars().build(scope, out)
}

/// `/calendarGroups` of a user.
pub(super) fn calendar_groups(user: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    Resource {
        noun: "calendar_group",
        plural: "calendar groups",
        segment: "/calendarGroups",
        key: "{calendarGroup-id}",
        tag: "calendar_groups",
        create: fields::calendar_group(),
        update: Some(Update::returning(fields::calendar_group())),
        list_query: odata::list(),
    }
    .build(user, out)
}

/// `GET`/`PATCH` of the user's primary calendar.
pub(super) fn primary_calendar(user: &Scope, out: &mut Vec<EndpointDescriptor>) -> Result<()> {
    out.push(
        user.endpoint("get_primary_calendar", HttpMethod::Get, "/calendar")?
            .summary(format!("Get the primary calendar of {}", user.label()))
            .query(odata::get())
            .tag("calendars"),
    );
    out.push(
        user.endpoint("update_primary_calendar", HttpMethod::Patch, "/calendar")?
            .summary(format!("Update the primary calendar of {}", user.label()))
            .body(fields::calendar())
            .tag("calendars"),
    );
    Ok(())
}

/// Permissions, `getSchedule`, and `allowedCalendarSharingRoles` on a single
/// calendar. `permanentDelete` is only offered where `deletable` is set; the
/// primary calendar cannot be deleted.
pub(super) fn calendar_node(
    calendar: &Scope,
    deletable: bool,
    out: &mut Vec<EndpointDescriptor>,
) -> Result<()> {
    let label = calendar.label();

    Resource {
        noun: "calendar_permission",
        plural: "calendar permissions",
        segment: "/calendarPermissions",
        key: "{calendarPermission-id}",
        tag: "permissions",
        create: fields::calendar_permission(true),
        update: Some(Update::returning(fields::calendar_permission(false))),
        list_query: odata::list(),
    }
    .build(calendar, out)?;

    out.push(
        calendar
            .endpoint("get_schedule", HttpMethod::Post, "/microsoft.graph.getSchedule")?
            .summary(format!(
                "Get the free/busy availability of users, distribution lists, or resources for a time period, via {label}"
            ))
            .body(fields::get_schedule())
            .response(ResponseShape::Collection)
            .tag("schedule"),
    );

    out.push(
        calendar
            .endpoint(
                "allowed_calendar_sharing_roles",
                HttpMethod::Get,
                "/microsoft.graph.allowedCalendarSharingRoles(User='{User}')",
            )?
            .summary(format!(
                "List the roles that can be granted to a user when sharing {label}"
            ))
            .query(odata::function())
            .response(ResponseShape::Collection)
            .tag("permissions"),
    );

    if deletable {
        out.push(
            calendar
                .endpoint(
                    "permanent_delete",
                    HttpMethod::Post,
                    "/microsoft.graph.permanentDelete",
                )?
                .summary(format!("Permanently delete {label}"))
                .body(BodyMode::None)
                .response(ResponseShape::Empty)
                .tag("calendars"),
        );
    }
    Ok(())
}
