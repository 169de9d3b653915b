//! Plain-text email bodies for each notification.

use folio_db::models::blog_comment::BlogComment;
use folio_db::models::contact_message::ContactMessage;

use crate::delivery::email::OutgoingEmail;

/// Newsletter broadcasts are split into BCC batches of this size.
pub const NEWSLETTER_BATCH_SIZE: usize = 50;

/// Owner notification for a new contact message.
pub fn contact_owner_notification(owner: &str, message: &ContactMessage) -> OutgoingEmail {
    let mut body = format!(
        "New contact form submission\n\n\
         Name: {}\n\
         Email: {}\n",
        message.name, message.email
    );
    if let Some(phone) = &message.phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(budget) = &message.budget {
        body.push_str(&format!("Budget: {budget}\n"));
    }
    if let Some(timeline) = &message.timeline {
        body.push_str(&format!("Timeline: {timeline}\n"));
    }
    body.push_str(&format!(
        "Subject: {}\n\nMessage:\n{}\n\nReceived: {}\n",
        message.subject,
        message.message,
        message.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    OutgoingEmail::to(owner, format!("New contact: {}", message.subject), body)
}

/// Acknowledgment sent back to the person who submitted the form.
pub fn contact_acknowledgment(site_name: &str, message: &ContactMessage) -> OutgoingEmail {
    let body = format!(
        "Hi {},\n\n\
         Thanks for getting in touch. Your message \"{}\" has been received \
         and I will reply as soon as possible.\n\n\
         {}\n",
        message.name, message.subject, site_name
    );
    OutgoingEmail::to(
        &message.email,
        format!("Thanks for reaching out - {site_name}"),
        body,
    )
}

/// Welcome email for a new or returning subscriber.
///
/// Includes a verification link when a token is present.
pub fn newsletter_welcome(
    site_name: &str,
    site_url: &str,
    email: &str,
    name: Option<&str>,
    verification_token: Option<&str>,
) -> OutgoingEmail {
    let greeting = name.map_or_else(|| "Hi there".to_string(), |n| format!("Hi {n}"));
    let mut body = format!(
        "{greeting},\n\n\
         Thanks for subscribing to the {site_name} newsletter. You'll hear \
         about new posts and projects as they go live.\n"
    );
    if let Some(token) = verification_token {
        body.push_str(&format!(
            "\nPlease confirm your address:\n{}/api/v1/newsletter/verify/{token}\n",
            site_url.trim_end_matches('/')
        ));
    }
    body.push_str(&format!("\n{site_name}\n"));

    OutgoingEmail::to(email, format!("Welcome to {site_name}"), body)
}

/// New-post announcements, one message per BCC batch.
pub fn new_post_broadcast(
    site_name: &str,
    site_url: &str,
    recipients: &[String],
    title: &str,
    slug: &str,
    excerpt: &str,
) -> Vec<OutgoingEmail> {
    let body = format!(
        "{title}\n\n{excerpt}\n\nRead it here: {}/blog/{slug}\n\n\
         You are receiving this because you subscribed to {site_name}.\n",
        site_url.trim_end_matches('/')
    );
    recipients
        .chunks(NEWSLETTER_BATCH_SIZE)
        .map(|batch| OutgoingEmail {
            to: Vec::new(),
            bcc: batch.to_vec(),
            subject: format!("New post: {title}"),
            body: body.clone(),
        })
        .collect()
}

/// Owner notification for a comment. Pending comments ask for moderation.
pub fn comment_owner_notification(
    owner: &str,
    site_url: &str,
    comment: &BlogComment,
    post_title: &str,
    post_slug: &str,
) -> OutgoingEmail {
    let state = if comment.is_approved {
        "Approved automatically"
    } else {
        "Pending approval"
    };
    let body = format!(
        "New comment on \"{post_title}\"\n\n\
         Commenter: {} ({})\n\n\
         Comment:\n{}\n\n\
         {state}\n\
         View: {}/blog/{post_slug}\n",
        comment.name,
        comment.email,
        comment.body,
        site_url.trim_end_matches('/')
    );
    OutgoingEmail::to(owner, format!("New comment on '{post_title}'"), body)
}

/// Tell a commenter that someone replied to them.
pub fn comment_reply_notification(
    site_url: &str,
    parent_name: &str,
    parent_email: &str,
    reply: &BlogComment,
    post_title: &str,
    post_slug: &str,
) -> OutgoingEmail {
    let body = format!(
        "Hi {parent_name},\n\n\
         {} replied to your comment on \"{post_title}\":\n\n\
         {}\n\n\
         Read the conversation: {}/blog/{post_slug}#comment-{}\n",
        reply.name,
        reply.body,
        site_url.trim_end_matches('/'),
        reply.id
    );
    OutgoingEmail::to(
        parent_email,
        format!("New reply to your comment on '{post_title}'"),
        body,
    )
}

/// Owner notification that a project crossed a view milestone.
pub fn view_milestone(owner: &str, title: &str, slug: &str, view_count: i64) -> OutgoingEmail {
    OutgoingEmail::to(
        owner,
        format!("\"{title}\" reached {view_count} views"),
        format!("Your project \"{title}\" ({slug}) has now been viewed {view_count} times.\n"),
    )
}
