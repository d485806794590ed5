use askama::Template;

use crate::event::PushEvent;

#[derive(Debug, Template)]
#[template(
    source = "{% if event.commits.is_empty() %}{{ event.pusher_name }} pushed to {{ event.repo_owner }}/{{ event.repo_name }}{% else %}{{ event.pusher_name }} pushed {{ event.commits.len() }} commits to {{ event.repo_owner }}/{{ event.repo_name }}{% endif %}\n{% for commit in event.commits %}  {{ commit.author }} {{ commit.short_id() }} - {{ commit.summary() }}\n{% endfor %}",
    ext = "txt"
)]
struct PushMessage<'a> {
    event: &'a PushEvent,
}

/// Renders the plain-text body of a push notification.
pub fn render(event: &PushEvent) -> Result<String, askama::Error> {
    PushMessage { event }.render()
}
