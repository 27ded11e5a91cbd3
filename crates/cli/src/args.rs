use std::ffi::OsString;

/// Long flags that may be spelled with a single dash, e.g. `-disable-isolation`.
const SINGLE_DASH_LONG_FLAGS: &[&str] = &[
    "version",
    "disable-isolation",
    "config",
    "json",
    "verbose",
    "quiet",
    "help",
];

/// Rewrites `-flag` / `-flag=value` into `--flag` / `--flag=value` for known long flags.
///
/// Everything after a bare `--` is passed through untouched.
pub(crate) fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_single_dash_long(rest) => {
                    OsString::from(format!("-{text}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS.contains(&name)
}
