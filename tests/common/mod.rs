#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn vox_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vox-analysis").unwrap();
    cmd.env_remove("VOX_ENV_FILE");
    cmd.env_remove("VOX_PROJECT_ROOT");
    cmd.env_remove("VOX_LOG");
    cmd.env_remove("NEXT_PUBLIC_SUPABASE_URL");
    cmd.env_remove("NEXT_PUBLIC_SUPABASE_ANON_KEY");
    cmd
}

/// Write `.env.local` into `dir`
pub fn write_env_local(dir: &Path, contents: &str) {
    fs::write(dir.join(".env.local"), contents).unwrap();
}
