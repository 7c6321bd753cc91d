use runcap::exec::CommandSpec;

/// `sh -c <script>`: the simplest way to get a child with precise control
/// over what it writes to which stream and how it exits.
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").arg("-c").arg(script)
}

/// A script writing exactly `bytes` bytes of `x` to stdout, no newline.
pub fn write_bytes(bytes: usize) -> CommandSpec {
    sh(&format!("head -c {bytes} /dev/zero | tr '\\0' x"))
}

/// A script writing `lines` numbered lines to stdout and stderr alternately.
pub fn numbered_lines(tag: &str, lines: usize) -> CommandSpec {
    sh(&format!(
        "i=0; while [ $i -lt {lines} ]; do echo \"{tag}-out-$i\"; echo \"{tag}-err-$i\" >&2; i=$((i+1)); done"
    ))
}
