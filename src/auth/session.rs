use actix_session::Session;
use serde::{Deserialize, Serialize};

/// One-shot notification rendered by the base template on the next page load.
/// `kind` doubles as the CSS class: "success", "error", or "warning".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub kind: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            kind: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Flash {
            kind: "warning".to_string(),
            message: message.into(),
        }
    }
}

pub fn set_flash(session: &Session, flash: Flash) {
    let _ = session.insert("flash", &flash);
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let flash = session.get::<Flash>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// The signed-in administrator's username, if any.
pub fn admin_name(session: &Session) -> Option<String> {
    session.get::<String>("admin").unwrap_or(None)
}

pub fn is_admin(session: &Session) -> bool {
    admin_name(session).is_some()
}

pub fn login_admin(session: &Session, username: &str) {
    session.renew();
    let _ = session.insert("admin", username);
}

pub fn logout(session: &Session) {
    session.purge();
}

/// Stash the payload for the post-check-in success page. Read once.
pub fn stash_checkin_result(session: &Session, meeting_name: &str, live_count: i64) {
    let _ = session.insert("checkin_meeting", meeting_name);
    let _ = session.insert("checkin_count", live_count);
}

pub fn take_checkin_result(session: &Session) -> Option<(String, i64)> {
    let meeting = session.get::<String>("checkin_meeting").unwrap_or(None)?;
    let count = session.get::<i64>("checkin_count").unwrap_or(None).unwrap_or(0);
    session.remove("checkin_meeting");
    session.remove("checkin_count");
    Some((meeting, count))
}
