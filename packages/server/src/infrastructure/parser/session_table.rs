//! `query session` output parser.
//!
//! ```text
//!  SESSIONNAME       USERNAME                 ID  STATE   TYPE        DEVICE
//!  services                                    0  Disc
//! >console           Administrator             1  Active
//!  rdp-tcp#0         alice                     2  Active  rdpwd
//!  rdp-tcp                                 65536  Listen
//! ```

const SESSION_STATES: [&str; 10] = [
    "Active", "Conn", "ConnQ", "Shadow", "Disc", "Idle", "Listen", "Reset", "Down", "Init",
];

fn is_session_state(token: &str) -> bool {
    SESSION_STATES
        .iter()
        .any(|state| state.eq_ignore_ascii_case(token))
}

/// One row of the session table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub session_name: String,
    pub username: Option<String>,
    pub session_id: u32,
    pub state: String,
    pub session_type: Option<String>,
    /// Row belongs to the session running the query (`>` marker)
    pub current: bool,
}

impl SessionRow {
    /// Session name starts with `prefix` (case-insensitive)
    pub fn is_remote(&self, prefix: &str) -> bool {
        self.session_name
            .to_ascii_lowercase()
            .starts_with(&prefix.to_ascii_lowercase())
    }

    pub fn is_active(&self) -> bool {
        self.state.eq_ignore_ascii_case("active")
    }

    pub fn is_listener(&self) -> bool {
        self.state.eq_ignore_ascii_case("listen")
    }
}

pub fn parse_session_table(output: &str) -> Vec<SessionRow> {
    output.lines().filter_map(parse_session_line).collect()
}

/// Parse a single line; returns `None` for headers and malformed rows.
///
/// The session id is the integer column followed by a known state, so an
/// all-digit username is not mistaken for it. Rows with an unknown state fall
/// back to the first integer column. Tokens between the session name and the
/// id form the username.
pub fn parse_session_line(line: &str) -> Option<SessionRow> {
    let trimmed = line.trim_end();
    let (current, body) = match trimmed.strip_prefix('>') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let (session_name, rest) = tokens.split_first()?;
    if session_name.eq_ignore_ascii_case("SESSIONNAME") {
        return None;
    }

    let is_id = |token: &&str| token.parse::<u32>().is_ok();
    let id_index = rest
        .windows(2)
        .position(|pair| is_id(&pair[0]) && is_session_state(pair[1]))
        .or_else(|| rest.iter().position(|token| is_id(token)))?;
    let session_id = rest[id_index].parse().ok()?;
    let state = rest.get(id_index + 1)?;
    let username = (id_index > 0).then(|| rest[..id_index].join(" "));

    Some(SessionRow {
        session_name: session_name.to_string(),
        username,
        session_id,
        state: state.to_string(),
        session_type: rest.get(id_index + 2).map(|t| t.to_string()),
        current,
    })
}
