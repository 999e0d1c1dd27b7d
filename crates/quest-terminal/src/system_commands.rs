//! System and session commands: `pwd`, `whoami`, `date`, `uname`,
//! `history`, `clear`, and the canned inspection commands (`ps`, `free`,
//! `df`, `top`, `ifconfig`, `ping`).
//!
//! The inspection outputs are fixed snapshots. Missions that require them
//! only check that the command was run, so the text is decorative.

use quest_types::OutputLine;

use crate::state::{CommandResult, StatePatch, TerminalState};

pub const USER: &str = "user";
pub const HOST: &str = "terminal-quest";

/// A deterministic clock keeps session transcripts reproducible.
const DATE: &str = "Mon Jan 15 09:41:23 UTC 2024";
const UNAME_FULL: &str = "Linux terminal-quest 5.15.0-generic #1 SMP x86_64 GNU/Linux";

pub fn pwd(state: &TerminalState) -> CommandResult {
    CommandResult::lines(vec![OutputLine::output(state.current_directory.clone())])
}

pub fn whoami() -> CommandResult {
    CommandResult::lines(vec![OutputLine::output(USER)])
}

pub fn date() -> CommandResult {
    CommandResult::lines(vec![OutputLine::output(DATE)])
}

pub fn uname(args: &[&str]) -> CommandResult {
    let text = if args.contains(&"-a") { UNAME_FULL } else { "Linux" };
    CommandResult::lines(vec![OutputLine::output(text)])
}

/// Numbered replay of the raw command history, oldest first.
pub fn history(state: &TerminalState) -> CommandResult {
    CommandResult::lines(
        state
            .command_history
            .iter()
            .enumerate()
            .map(|(i, cmd)| OutputLine::output(format!("  {}  {cmd}", i + 1)))
            .collect(),
    )
}

/// Empties the scrollback; the filesystem and history are untouched.
pub fn clear() -> CommandResult {
    CommandResult {
        output: Vec::new(),
        patch: StatePatch {
            output_history: Some(Vec::new()),
            ..StatePatch::default()
        },
    }
}

// ---------------------------------------------------------------------------
// canned inspection snapshots
// ---------------------------------------------------------------------------

const PS_PLAIN: &[&str] = &[
    "    PID TTY          TIME CMD",
    "      1 pts/0    00:00:00 bash",
    "     42 pts/0    00:00:00 ps",
];

const PS_AUX: &[&str] = &[
    "USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND",
    "root           1  0.0  0.1 167744 11456 ?        Ss   09:40   0:01 /sbin/init",
    "root         214  0.0  0.2  47216 18332 ?        Ss   09:40   0:00 /lib/systemd/systemd-journald",
    "user         801  0.0  0.0  10156  5244 pts/0    Ss   09:41   0:00 bash",
    "user         842  0.0  0.0  12108  3512 pts/0    R+   09:41   0:00 ps aux",
];

pub fn ps(args: &[&str]) -> CommandResult {
    let table = if args.contains(&"aux") { PS_AUX } else { PS_PLAIN };
    CommandResult::lines(table.iter().copied().map(OutputLine::output).collect())
}

const FREE_PLAIN: &[&str] = &[
    "               total        used        free      shared  buff/cache   available",
    "Mem:         8029356     1423504     4890172       51208     1715680     6315992",
    "Swap:        2097148           0     2097148",
];

const FREE_HUMAN: &[&str] = &[
    "               total        used        free      shared  buff/cache   available",
    "Mem:           7.7Gi       1.4Gi       4.7Gi        50Mi       1.6Gi       6.0Gi",
    "Swap:          2.0Gi          0B       2.0Gi",
];

pub fn free(args: &[&str]) -> CommandResult {
    let table = if args.contains(&"-h") { FREE_HUMAN } else { FREE_PLAIN };
    CommandResult::lines(table.iter().copied().map(OutputLine::output).collect())
}

const DF_PLAIN: &[&str] = &[
    "Filesystem     1K-blocks    Used Available Use% Mounted on",
    "/dev/sda1       41152812 8123404  31113920  21% /",
    "tmpfs            4014676       0   4014676   0% /dev/shm",
];

const DF_HUMAN: &[&str] = &[
    "Filesystem      Size  Used Avail Use% Mounted on",
    "/dev/sda1        40G  7.8G   30G  21% /",
    "tmpfs           3.9G     0  3.9G   0% /dev/shm",
];

pub fn df(args: &[&str]) -> CommandResult {
    let table = if args.contains(&"-h") { DF_HUMAN } else { DF_PLAIN };
    CommandResult::lines(table.iter().copied().map(OutputLine::output).collect())
}

const TOP: &[&str] = &[
    "top - 09:41:23 up 1 min,  1 user,  load average: 0.08, 0.03, 0.01",
    "Tasks:  23 total,   1 running,  22 sleeping,   0 stopped,   0 zombie",
    "%Cpu(s):  0.3 us,  0.2 sy,  0.0 ni, 99.5 id,  0.0 wa,  0.0 hi,  0.0 si",
    "MiB Mem :   7841.2 total,   4775.6 free,   1390.1 used,   1675.5 buff/cache",
    "",
    "    PID USER      PR  NI    VIRT    RES    SHR S  %CPU  %MEM     TIME+ COMMAND",
    "      1 root      20   0  167744  11456   8312 S   0.0   0.1   0:01.02 init",
    "    801 user      20   0   10156   5244   3404 S   0.0   0.1   0:00.04 bash",
];

pub fn top() -> CommandResult {
    CommandResult::lines(TOP.iter().copied().map(OutputLine::output).collect())
}

const IFCONFIG: &[&str] = &[
    "eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500",
    "        inet 10.0.2.15  netmask 255.255.255.0  broadcast 10.0.2.255",
    "        ether 08:00:27:4e:66:a1  txqueuelen 1000  (Ethernet)",
    "        RX packets 1204  bytes 1311842 (1.3 MB)",
    "        TX packets 876  bytes 112394 (112.3 KB)",
    "",
    "lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536",
    "        inet 127.0.0.1  netmask 255.0.0.0",
    "        loop  txqueuelen 1000  (Local Loopback)",
];

pub fn ifconfig() -> CommandResult {
    CommandResult::lines(IFCONFIG.iter().copied().map(OutputLine::output).collect())
}

/// Fixed four-probe exchange; only the host name varies.
pub fn ping(args: &[&str]) -> CommandResult {
    let Some(host) = args.iter().find(|a| !a.starts_with('-')) else {
        return CommandResult::error("ping: usage error: Destination address required");
    };
    let mut output = vec![OutputLine::output(format!(
        "PING {host} (10.0.2.2) 56(84) bytes of data."
    ))];
    for (seq, time) in [(1, "0.042"), (2, "0.038"), (3, "0.041"), (4, "0.039")] {
        output.push(OutputLine::output(format!(
            "64 bytes from {host} (10.0.2.2): icmp_seq={seq} ttl=64 time={time} ms"
        )));
    }
    output.push(OutputLine::output(String::new()));
    output.push(OutputLine::output(format!("--- {host} ping statistics ---")));
    output.push(OutputLine::output(
        "4 packets transmitted, 4 received, 0% packet loss, time 3052ms",
    ));
    CommandResult::lines(output)
}
