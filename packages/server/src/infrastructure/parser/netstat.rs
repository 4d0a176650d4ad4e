//! Connection listing parser.
//!
//! Accepts both the Windows `netstat -ano` layout
//! (`TCP  local  remote  ESTABLISHED  pid`) and the Linux `netstat -tnp`
//! layout (`tcp  recv-q  send-q  local  remote  ESTABLISHED  pid/program`).
//! Columns are located relative to the state column.

const ESTABLISHED: &str = "ESTABLISHED";

/// One established TCP connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRow {
    pub local_address: String,
    pub remote_address: String,
    pub pid: Option<u32>,
    /// Program name when the tool reports it inline (`pid/program`)
    pub program: Option<String>,
}

impl ConnectionRow {
    pub fn local_port(&self) -> Option<u16> {
        split_host_port(&self.local_address).map(|(_, port)| port)
    }

    pub fn remote_ip(&self) -> Option<&str> {
        split_host_port(&self.remote_address).map(|(host, _)| host)
    }
}

/// Established connections only; listeners and other states are skipped
pub fn parse_connection_table(output: &str) -> Vec<ConnectionRow> {
    output.lines().filter_map(parse_connection_line).collect()
}

fn parse_connection_line(line: &str) -> Option<ConnectionRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let protocol = tokens.first()?;
    if !protocol.to_ascii_lowercase().starts_with("tcp") {
        return None;
    }

    let state_index = tokens
        .iter()
        .position(|token| token.eq_ignore_ascii_case(ESTABLISHED))?;
    if state_index < 3 {
        return None;
    }

    let local_address = tokens[state_index - 2];
    let remote_address = tokens[state_index - 1];
    split_host_port(local_address)?;
    split_host_port(remote_address)?;

    let (pid, program) = match tokens.get(state_index + 1) {
        Some(owner) => match owner.split_once('/') {
            Some((pid, program)) => (pid.parse().ok(), Some(program.to_string())),
            None => (owner.parse().ok(), None),
        },
        None => (None, None),
    };

    Some(ConnectionRow {
        local_address: local_address.to_string(),
        remote_address: remote_address.to_string(),
        pid,
        program,
    })
}

/// Split `host:port`, `[v6]:port` or bare `v6:port` at the last colon
pub fn split_host_port(address: &str) -> Option<(&str, u16)> {
    let (host, port) = address.rsplit_once(':')?;
    let port = port.parse().ok()?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some((host, port))
}
