//! Feed renderer
//!
//! Renders posts, panels and notifications to HTML markup. Every function
//! here is pure: same input, same markup. Interactive elements carry
//! `data-action` / `data-post-id` attributes which the driver maps back to
//! a `FeedAction`.

use crate::domain::entities::{FeedStats, Notification, Post, Session, UserSummary};

/// Longest notification text rendered before it is cut
const MAX_NOTIFICATION_CHARS: usize = 280;

/// Render the post list, or the empty state when there are no posts
pub fn render_posts(posts: &[Post], session: &Session) -> String {
    if posts.is_empty() {
        return render_empty_state();
    }

    let mut buf = String::new();
    for post in posts {
        buf.push_str(&render_post(post, session.is_admin()));
    }
    buf
}

fn render_empty_state() -> String {
    let mut buf = String::new();
    buf.push_str("<div class=\"post-card\">\n");
    buf.push_str("  <div class=\"empty-state\">\n");
    buf.push_str("    <h3>📭 No posts yet</h3>\n");
    buf.push_str("    <p>Create the first post!</p>\n");
    buf.push_str("  </div>\n");
    buf.push_str("</div>\n");
    buf
}

fn render_post(post: &Post, admin: bool) -> String {
    let mut buf = String::new();

    buf.push_str(&format!(
        "<div class=\"post-card\" data-post-id=\"{}\">\n",
        post.id
    ));

    // Header
    buf.push_str("  <div class=\"post-header\">\n");
    buf.push_str(&format!(
        "    <div class=\"post-author\">👤 {}{}</div>\n",
        escape_html(&post.author),
        if post.author_role.is_admin() {
            " <span class=\"admin-badge\">👑</span>"
        } else {
            ""
        }
    ));
    buf.push_str(&format!(
        "    <div class=\"post-date\">📅 {}</div>\n",
        escape_html(&post.date_posted)
    ));
    buf.push_str("  </div>\n");

    // Body
    buf.push_str(&format!(
        "  <h3 class=\"post-title\">{}</h3>\n",
        escape_html(&post.title)
    ));
    buf.push_str(&format!(
        "  <div class=\"post-content\">{}</div>\n",
        escape_html(&post.content)
    ));

    // Actions
    buf.push_str("  <div class=\"post-actions\">\n");
    buf.push_str(&format!("    {}\n", render_like_control(post)));
    if admin {
        buf.push_str(&format!(
            "    <button class=\"delete-btn\" data-action=\"delete\" data-post-id=\"{}\">🗑️ Delete</button>\n",
            post.id
        ));
    }
    buf.push_str("  </div>\n");
    buf.push_str("</div>\n");

    buf
}

/// Render the like toggle of one post
///
/// Own posts get a disabled control. Otherwise the icon, label and
/// `data-action` follow the viewer's current like state.
pub fn render_like_control(post: &Post) -> String {
    if post.is_own {
        return format!(
            "<span class=\"like-control\" id=\"like-{id}\"><button class=\"like-btn own\" data-action=\"like\" data-post-id=\"{id}\" disabled title=\"You cannot like your own post\">🤍 Like <span class=\"like-count\">{likes}</span></button></span>",
            id = post.id,
            likes = post.likes
        );
    }

    let state = post.like_state();
    let (class, icon, label) = if state.is_liked() {
        ("like-btn liked", "❤️", "Unlike")
    } else {
        ("like-btn", "🤍", "Like")
    };

    format!(
        "<span class=\"like-control\" id=\"like-{id}\"><button class=\"{class}\" data-action=\"{action}\" data-post-id=\"{id}\">{icon} {label} <span class=\"like-count\">{likes}</span></button></span>",
        id = post.id,
        class = class,
        action = state.next_action(),
        icon = icon,
        label = label,
        likes = post.likes
    )
}

/// Render the inline retry affordance shown when the post list cannot be loaded
pub fn render_load_error(message: &str) -> String {
    let mut buf = String::new();
    buf.push_str("<div class=\"post-card load-error\">\n");
    buf.push_str(&format!(
        "  <p>❌ Could not load posts: {}</p>\n",
        escape_html(message)
    ));
    buf.push_str("  <button class=\"retry-btn\" data-action=\"refresh\">🔄 Retry</button>\n");
    buf.push_str("</div>\n");
    buf
}

/// Render the recent users panel
pub fn render_recent_users(users: &[UserSummary]) -> String {
    if users.is_empty() {
        return "<p>👥 No users yet</p>\n".to_string();
    }

    let mut buf = String::new();
    for user in users {
        buf.push_str("<div class=\"user-item\">\n");
        buf.push_str(&format!(
            "  <div class=\"user-avatar\">{}</div>\n",
            escape_html(&user.initial())
        ));
        buf.push_str("  <div class=\"user-info\">\n");
        buf.push_str(&format!(
            "    <div class=\"user-name\">{}{}</div>\n",
            escape_html(&user.full_name),
            if user.role.is_admin() {
                " <span class=\"admin-badge\">👑</span>"
            } else {
                ""
            }
        ));
        buf.push_str(&format!(
            "    <div class=\"user-email\">📧 {}</div>\n",
            escape_html(&user.email)
        ));
        buf.push_str(&format!(
            "    <div class=\"user-date\">📅 {}</div>\n",
            escape_html(&user.registration_date)
        ));
        buf.push_str("  </div>\n");
        buf.push_str("</div>\n");
    }
    buf
}

/// Render the admin stats panel
pub fn render_stats(stats: &FeedStats) -> String {
    format!(
        "<div class=\"stat\"><span id=\"totalPosts\">{}</span> posts</div>\n<div class=\"stat\"><span id=\"totalLikes\">{}</span> likes</div>\n",
        stats.total_posts, stats.total_likes
    )
}

/// Render a notification banner
pub fn render_notification(notification: &Notification) -> String {
    format!(
        "<div class=\"notification {}\" data-notification-id=\"{}\">{}</div>",
        notification.kind,
        notification.id,
        escape_html(&truncate(&notification.message, MAX_NOTIFICATION_CHARS))
    )
}

/// Regions of the page at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub admin: bool,
    pub posts: String,
    pub stats: String,
    pub recent_users: String,
    pub notification: Option<String>,
    /// Controls currently disabled, e.g. `like-3`
    pub pending: Vec<String>,
}

/// Render a full standalone page from its regions
pub fn render_page(page: &PageSnapshot) -> String {
    let mut buf = String::new();

    buf.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    buf.push_str("<meta charset=\"utf-8\">\n");
    buf.push_str("<meta http-equiv=\"refresh\" content=\"5\">\n");
    buf.push_str("<title>Newsfeed</title>\n");
    buf.push_str("</head>\n<body>\n");

    if let Some(notification) = &page.notification {
        buf.push_str(notification);
        buf.push('\n');
    }

    if page.admin {
        buf.push_str("<section id=\"stats\">\n");
        buf.push_str(&page.stats);
        buf.push_str("</section>\n");
        buf.push_str("<section id=\"quickPost\" data-action=\"quick\"></section>\n");
    }

    buf.push_str("<main id=\"postsContainer\">\n");
    buf.push_str(&page.posts);
    buf.push_str("</main>\n");

    if page.admin {
        buf.push_str("<aside id=\"recentUsers\">\n");
        buf.push_str(&page.recent_users);
        buf.push_str("</aside>\n");
    }

    if !page.pending.is_empty() {
        buf.push_str(&format!(
            "<div id=\"pending\" data-controls=\"{}\"></div>\n",
            escape_html(&page.pending.join(" "))
        ));
    }

    buf.push_str("</body>\n</html>\n");
    buf
}

/// Plain-text digest of the feed for the terminal
pub fn render_summary(posts: &[Post], session: &Session) -> String {
    let mut buf = String::new();

    buf.push_str("# Newsfeed\n\n");

    if posts.is_empty() {
        buf.push_str("_No posts yet._\n");
        return buf;
    }

    for post in posts {
        let mut markers = Vec::new();
        if post.is_own {
            markers.push("yours");
        } else if post.user_liked {
            markers.push("liked");
        }
        if post.author_role.is_admin() {
            markers.push("admin");
        }
        let markers = if markers.is_empty() {
            String::new()
        } else {
            format!(" ({})", markers.join(", "))
        };

        buf.push_str(&format!(
            "[{}] {} by {}{} | {} | {} likes\n    {}\n",
            post.id,
            post.title,
            post.author,
            markers,
            post.date_posted,
            post.likes,
            truncate(&post.content, 80)
        ));
    }

    if session.is_admin() {
        let stats = FeedStats::from_posts(posts);
        buf.push_str(&format!(
            "\n{} posts, {} likes in total\n",
            stats.total_posts, stats.total_likes
        ));
    }

    buf
}

/// Escape text for use in element content and attribute values
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate a string with ellipsis, counting characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NotificationKind, Role};
    use crate::test_utils::{admin_session, test_post, test_user, user_session};

    // ===== render_posts tests =====

    #[test]
    fn render_posts_empty_shows_empty_state() {
        let result = render_posts(&[], &user_session());

        assert!(result.contains("No posts yet"));
        assert!(result.contains("Create the first post!"));
        assert!(!result.contains("data-post-id"));
    }

    #[test]
    fn render_posts_one_entry_per_post() {
        let mut first = test_post(1);
        first.likes = 4;
        first.date_posted = "01.02.2024 10:30".to_string();
        let mut second = test_post(2);
        second.likes = 0;

        let result = render_posts(&[first, second], &user_session());

        assert_eq!(result.matches("class=\"post-card\"").count(), 2);
        assert!(result.contains("data-post-id=\"1\""));
        assert!(result.contains("data-post-id=\"2\""));
        assert!(result.contains("<span class=\"like-count\">4</span>"));
        assert!(result.contains("<span class=\"like-count\">0</span>"));
        assert!(result.contains("📅 01.02.2024 10:30"));
    }

    #[test]
    fn render_posts_delete_only_for_admin() {
        let posts = vec![test_post(1), test_post(2)];

        let as_user = render_posts(&posts, &user_session());
        let as_admin = render_posts(&posts, &admin_session());

        assert!(!as_user.contains("data-action=\"delete\""));
        assert_eq!(as_admin.matches("data-action=\"delete\"").count(), 2);
    }

    #[test]
    fn render_posts_marks_admin_author() {
        let mut post = test_post(1);
        post.author_role = Role::Admin;

        let result = render_posts(&[post], &user_session());

        assert!(result.contains("admin-badge"));
    }

    #[test]
    fn render_posts_escapes_user_text() {
        let mut post = test_post(1);
        post.title = "<script>alert(1)</script>".to_string();
        post.content = "Tom & \"Jerry\"".to_string();

        let result = render_posts(&[post], &user_session());

        assert!(!result.contains("<script>"));
        assert!(result.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(result.contains("Tom &amp; &quot;Jerry&quot;"));
    }

    // ===== render_like_control tests =====

    #[test]
    fn like_control_unliked_offers_like() {
        let mut post = test_post(3);
        post.likes = 2;

        let result = render_like_control(&post);

        assert!(result.contains("data-action=\"like\""));
        assert!(result.contains("🤍 Like"));
        assert!(!result.contains("disabled"));
    }

    #[test]
    fn like_control_liked_offers_unlike() {
        let mut post = test_post(3);
        post.user_liked = true;
        post.likes = 5;

        let result = render_like_control(&post);

        assert!(result.contains("data-action=\"unlike\""));
        assert!(result.contains("❤️ Unlike"));
        assert!(result.contains("<span class=\"like-count\">5</span>"));
    }

    #[test]
    fn like_control_own_post_is_disabled() {
        let mut post = test_post(3);
        post.is_own = true;

        let result = render_like_control(&post);

        assert!(result.contains("disabled"));
        assert!(result.contains("You cannot like your own post"));
    }

    // ===== other regions =====

    #[test]
    fn load_error_has_retry_control() {
        let result = render_load_error("Server error (500)");

        assert!(result.contains("data-action=\"refresh\""));
        assert!(result.contains("Server error (500)"));
    }

    #[test]
    fn recent_users_empty_and_filled() {
        assert!(render_recent_users(&[]).contains("No users yet"));

        let mut admin = test_user("Ada Lovelace", "10.12.2023 09:15");
        admin.role = Role::Admin;
        let result = render_recent_users(&[admin, test_user("bob", "11.12.2023 09:15")]);

        assert_eq!(result.matches("class=\"user-item\"").count(), 2);
        assert!(result.contains("<div class=\"user-avatar\">A</div>"));
        assert!(result.contains("<div class=\"user-avatar\">B</div>"));
        assert_eq!(result.matches("admin-badge").count(), 1);
    }

    #[test]
    fn stats_show_totals() {
        let result = render_stats(&FeedStats {
            total_posts: 3,
            total_likes: 12,
        });

        assert!(result.contains("<span id=\"totalPosts\">3</span>"));
        assert!(result.contains("<span id=\"totalLikes\">12</span>"));
    }

    #[test]
    fn notification_is_escaped_and_truncated() {
        let notification = Notification {
            id: 9,
            kind: NotificationKind::Error,
            message: format!("<b>{}</b>", "x".repeat(400)),
        };

        let result = render_notification(&notification);

        assert!(result.contains("notification error"));
        assert!(result.contains("data-notification-id=\"9\""));
        assert!(result.contains("&lt;b&gt;"));
        assert!(result.contains("..."));
    }

    #[test]
    fn page_hides_admin_regions_for_users() {
        let page = PageSnapshot {
            admin: false,
            posts: "POSTS".to_string(),
            stats: "STATS".to_string(),
            recent_users: "USERS".to_string(),
            notification: None,
            pending: vec![],
        };

        let result = render_page(&page);

        assert!(result.contains("POSTS"));
        assert!(!result.contains("STATS"));
        assert!(!result.contains("USERS"));

        let admin_page = render_page(&PageSnapshot {
            admin: true,
            pending: vec!["like-3".to_string()],
            ..page
        });
        assert!(admin_page.contains("STATS"));
        assert!(admin_page.contains("USERS"));
        assert!(admin_page.contains("data-controls=\"like-3\""));
    }

    // ===== render_summary tests =====

    #[test]
    fn summary_lists_posts_with_markers() {
        let mut own = test_post(1);
        own.is_own = true;
        let mut liked = test_post(2);
        liked.user_liked = true;
        liked.likes = 3;

        let result = render_summary(&[own, liked], &user_session());

        assert!(result.contains("[1] Post 1 by Jane Doe (yours)"));
        assert!(result.contains("[2] Post 2 by Jane Doe (liked) | 15.03.2024 12:00 | 3 likes"));
        assert!(!result.contains("in total"));
    }

    #[test]
    fn summary_shows_totals_for_admin() {
        let mut post = test_post(1);
        post.likes = 2;

        let result = render_summary(&[post], &admin_session());

        assert!(result.contains("1 posts, 2 likes in total"));
        assert!(render_summary(&[], &admin_session()).contains("_No posts yet._"));
    }

    // ===== truncate tests =====

    #[test]
    fn truncate_long_string() {
        let long = "This is a very long string that exceeds the maximum length";
        let result = truncate(long, 20);

        assert_eq!(result.chars().count(), 20);
        assert_eq!(result, "This is a very lo...");
    }

    #[test]
    fn truncate_multibyte_string() {
        let result = truncate(&"ї".repeat(30), 10);

        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn truncate_exact_length() {
        let exact = "12345678901234567890";
        assert_eq!(truncate(exact, 20), exact);
    }
}
