//! Static sshd corpora used across harnesses.

/// Invocation date every harness pins its reconciler to.
pub const TODAY: (i32, u32, u32) = (2026, 10, 18);

/// One message per priority id that no higher-priority entry also matches,
/// with the id it must classify to.
pub const PRIORITY_MESSAGES: &[(&str, &str)] = &[
    ("E27", "reverse mapping checking getaddrinfo for host.example [10.1.1.1] failed - POSSIBLE BREAK-IN ATTEMPT!"),
    ("E10", "Failed password for invalid user webmaster from 173.234.31.186 port 38926 ssh2"),
    ("E9", "Failed password for root from 183.62.140.253 port 38795 ssh2"),
    ("E13", "Invalid user admin from 52.80.34.196"),
    ("E20", "pam_unix(sshd:auth): authentication failure; logname= uid=0 euid=0 tty=ssh ruser= rhost=183.62.140.253  user=root"),
    ("E19", "pam_unix(sshd:auth): authentication failure; logname= uid=0 euid=0 tty=ssh rhost=183.62.140.253"),
    ("E17", "PAM 5 more authentication failures; logname= uid=0 euid=0 tty=ssh ruser= rhost=183.62.140.253  user=root"),
    ("E16", "PAM 2 more authentication failures; logname= uid=0 euid=0 tty=ssh ruser= rhost=112.95.230.3"),
    ("E15", "PAM 1 more authentication failure; logname= uid=0 euid=0 tty=ssh ruser= rhost=112.95.230.3"),
    ("E7", "error: Received disconnect from 1.2.3.4: 3: No more user authentication methods available. [preauth]"),
    ("E6", "error: Received disconnect from 1.2.3.4: 3: com.jcraft.jsch.JSchException: Auth fail [preauth]"),
    ("E5", "Disconnecting: Too many authentication failures for root [preauth]"),
    ("E4", "Disconnecting: Too many authentication failures for admin [preauth]"),
    ("E24", "Received disconnect from 103.99.0.122: 11: Bye Bye [preauth]"),
    ("E25", "Received disconnect from 5.188.10.180: 11: Closed due to user request. [preauth]"),
    ("E26", "Received disconnect from 5.188.10.180: 11: disconnected by user"),
    ("E12", "input_userauth_request: invalid user admin [preauth]"),
    ("E1", "Accepted password for fztu from 119.137.62.142 port 49116 ssh2"),
    ("E21", "pam_unix(sshd:auth): check pass; user unknown"),
];

/// Messages only reachable through the declaration-order fallback scan.
pub const FALLBACK_MESSAGES: &[(&str, &str)] = &[
    ("E2", "Connection closed by 194.190.163.22 [preauth]"),
    ("E3", "Did not receive identification string from 5.36.59.76"),
    ("E22", "pam_unix(sshd:session): session closed for user fztu"),
    ("E23", "pam_unix(sshd:session): session opened for user fztu by (uid=0)"),
    ("E32", "Bad packet length 1397966893. [preauth]"),
    ("E35", "Received disconnect from 5.188.10.180: 11: Normal Shutdown, Thank you for playing [preauth]"),
    ("E51", "Server listening on 0.0.0.0 port 22."),
    ("E55", "syslogin_perform_logout: logout() returned an error"),
];

/// A capture that straddles a December/January boundary, with a malformed
/// stamp and foreign lines in between.
pub const YEAR_BOUNDARY_LOG: &str = "\
Dec 31 23:59:58 LabSZ sshd[24200]: Failed password for root from 10.0.0.5 port 22 ssh2
Dec 31 23:59:59 LabSZ sshd[24201]: Invalid user admin from 203.0.113.7
Xyz 31 23:59:59 LabSZ sshd[24202]: Connection closed by 203.0.113.7 [preauth]
Dec 31 23:59:59 LabSZ CRON[1]: (root) CMD (run-parts /etc/cron.hourly)
Jan  1 00:00:05 LabSZ sshd[24203]: Accepted password for fztu from 119.137.62.142 port 49116 ssh2
Jan  1 00:01:00 LabSZ sshd[24204]: pam_unix(sshd:session): session opened for user fztu by (uid=0)
";

/// A short capture used by the end-to-end harness.
pub const PIPELINE_LOG: &str = "\
Jan  5 10:00:01 LabSZ sshd[100]: Failed password for root from 10.0.0.5 port 22 ssh2
Jan  5 10:00:02 LabSZ sshd[101]: Invalid user admin from 203.0.113.7
Jan  5 10:00:03 LabSZ CRON[5]: (root) CMD (run-parts /etc/cron.hourly)
Jan  5 10:00:04 LabSZ sshd[102]: pam_unix(sshd:auth): authentication failure; logname= uid=0 euid=0 tty=ssh ruser= rhost=10.0.0.5  user=root
Jan  5 10:00:05 LabSZ sshd[103]: Server listening on 0.0.0.0 port 22.
Jan  5 10:00:06 LabSZ sshd[104]: Some message, with a comma
";
