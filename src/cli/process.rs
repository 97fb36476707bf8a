use std::{env, path::Path, process::Stdio};

use anyhow::Result;
use sysinfo::{get_current_pid, Signal, System};
use tracing::info;

/// Terminates every running `serve` instance of this executable. Matching
/// on the `serve` argument keeps an unrelated concurrent invocation (say, a
/// long `weekly` report) out of the blast radius.
pub fn kill_running_trackers(name: &Path) {
    let system = System::new_all();
    let current_id = get_current_pid().unwrap();
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }
        if matches!(process.parent(), Some(p) if p == current_id) {
            continue;
        }

        let same_exe = process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some();
        let is_tracker = process
            .cmd()
            .iter()
            .any(|arg| arg.to_str() == Some("serve"));

        if same_exe && is_tracker {
            // This will forcefully terminate the process on Windows. Anything better will require a
            // lot more work.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
        }
    }
}

/// Shuts down the previous tracker and detaches a fresh `serve` process on
/// the same application directory. Waiting on the old one first keeps its
/// shutdown write ahead of whatever the caller appends next.
pub fn restart_tracker(app_dir: &Path) -> Result<()> {
    // The program uses the executable passed into the process. It's not the best option but it
    // will do the job in most cases.
    let process_name = env::current_exe().expect("Can't operate without an executable");
    kill_running_trackers(&process_name);
    let mut command = std::process::Command::new(process_name);
    command.arg("serve");
    command.arg("--dir");
    command.arg(app_dir);

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::DETACHED_PROCESS;
        command.creation_flags(DETACHED_PROCESS.0);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
        command.stdin(Stdio::null());
        command.stdout(Stdio::null());
        command.stderr(Stdio::null());
    }

    #[allow(clippy::zombie_processes)]
    let _ = command.spawn()?;
    info!("Spawned a detached tracker");
    Ok(())
}
