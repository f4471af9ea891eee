//! Action parser for feed commands
//!
//! Maps text commands ("like 3", "delete 4") and rendered `data-action`
//! attributes onto `FeedAction`, the single vocabulary the controller
//! dispatches on.

use crate::domain::entities::{PostDraft, PostId};
use crate::error::ParseError;

/// Actions a user can take on the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    /// Reload the post list (and the users panel for admins)
    Refresh,

    /// Submit the post form
    CreatePost { draft: PostDraft },

    /// Admin quick post with the fixed title
    QuickPost { content: String },

    /// Like or unlike, depending on the viewer's current state
    ToggleLike { post_id: PostId },

    /// Delete a post after confirmation (admin)
    Delete { post_id: PostId },

    /// Reload the recent users panel (admin)
    RecentUsers,

    /// Show the command list
    Help,
}

impl FeedAction {
    /// Map a rendered control's `data-action` / `data-post-id` pair to an action
    pub fn from_control(action: &str, post_id: Option<PostId>) -> Result<Self, ParseError> {
        let require_id = || post_id.ok_or_else(|| ParseError::MissingArgument(action.to_string()));

        match action {
            "refresh" => Ok(FeedAction::Refresh),
            "like" | "unlike" => Ok(FeedAction::ToggleLike {
                post_id: require_id()?,
            }),
            "delete" => Ok(FeedAction::Delete {
                post_id: require_id()?,
            }),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse a feed action from text input
pub fn parse_action(input: &str) -> Result<FeedAction, ParseError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ParseError::UnknownCommand("empty input".to_string()));
    }

    // Command word, then the untouched remainder (post text keeps its spacing)
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    };

    // Control ids as they appear on the rendered page, e.g. "like-3"
    if let Some((action, id)) = split_control_id(&command) {
        return FeedAction::from_control(action, Some(id));
    }

    match command.as_str() {
        "refresh" | "reload" | "r" => Ok(FeedAction::Refresh),

        "post" | "new" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("post".to_string()));
            }
            // "post <title> | <content>"; a missing separator leaves content
            // empty so validation reports it.
            let (title, content) = rest.split_once('|').unwrap_or((rest, ""));
            Ok(FeedAction::CreatePost {
                draft: PostDraft::new(title.trim(), content.trim()),
            })
        }

        "quick" | "news" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("quick".to_string()));
            }
            Ok(FeedAction::QuickPost {
                content: rest.to_string(),
            })
        }

        "like" | "unlike" | "delete" => {
            FeedAction::from_control(&command, Some(parse_post_id(&command, rest)?))
        }

        "toggle" => Ok(FeedAction::ToggleLike {
            post_id: parse_post_id(&command, rest)?,
        }),

        "del" | "rm" => Ok(FeedAction::Delete {
            post_id: parse_post_id(&command, rest)?,
        }),

        "users" | "recent-users" => Ok(FeedAction::RecentUsers),

        "help" | "?" | "commands" => Ok(FeedAction::Help),

        _ => Err(ParseError::UnknownCommand(command)),
    }
}

fn split_control_id(word: &str) -> Option<(&str, PostId)> {
    let (action, id) = word.rsplit_once('-')?;
    let id = id.parse::<i64>().ok()?;
    Some((action, PostId(id)))
}

fn parse_post_id(command: &str, arg: &str) -> Result<PostId, ParseError> {
    let arg = arg.split_whitespace().next().unwrap_or("");
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(command.to_string()));
    }
    arg.parse::<PostId>().map_err(ParseError::InvalidArgument)
}

/// Help text for the terminal driver
pub fn help_text() -> String {
    r#"Available commands

Feed
- `refresh` - Reload the feed
- `post <title> | <content>` - Publish a post
- `like N` - Like post N, or unlike it if you already liked it
- `like-N`, `delete-N` - Act on a control by its id on the page

Admin
- `quick <text>` - Publish an important-news quick post
- `delete N` - Delete post N (asks for confirmation)
- `users` - Reload the recent users panel

Other
- `help` - Show this help message
- `quit` - Exit
"#
    .to_string()
}
