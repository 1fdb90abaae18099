use rehighlight::kernel::language::LanguageId;
use std::path::PathBuf;

pub const USAGE: &str =
    "usage: rehighlight <path> [--lang NAME] [--scroll PX] [--height PX] [--list-kinds]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub path: PathBuf,
    pub language: Option<LanguageId>,
    pub scroll: f32,
    /// `None` shows the whole file.
    pub height: Option<f32>,
    pub list_kinds: bool,
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut path = None;
    let mut language = None;
    let mut scroll = 0.0;
    let mut height = None;
    let mut list_kinds = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => {
                let name = value_for(&mut args, "--lang")?;
                language = Some(
                    LanguageId::from_name(&name)
                        .ok_or_else(|| format!("unknown language: {}", name))?,
                );
            }
            "--scroll" => scroll = pixels(&value_for(&mut args, "--scroll")?)?,
            "--height" => height = Some(pixels(&value_for(&mut args, "--height")?)?),
            "--list-kinds" => list_kinds = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {}", arg)),
        }
    }

    Ok(CliArgs {
        path: path.ok_or_else(|| "missing <path>".to_string())?,
        language,
        scroll,
        height,
        list_kinds,
    })
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn pixels(value: &str) -> Result<f32, String> {
    match value.parse::<f32>() {
        Ok(px) if px.is_finite() && px >= 0.0 => Ok(px),
        _ => Err(format!("not a pixel value: {}", value)),
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
