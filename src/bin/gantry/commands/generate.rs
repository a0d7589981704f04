//! `gantry generate` command

use anyhow::{bail, Result};

use crate::cli::{GenerateArgs, Mode};
use gantry::generator::{Generator, GeneratorConfig, DEFAULT_BUILD_FILE_NAME};
use gantry::printer;
use gantry::rules::VendoredResolver;
use gantry::util::config::{Config, CONFIG_FILE_NAME};

pub fn execute(args: GenerateArgs) -> Result<()> {
    // Repository defaults from gantry.toml; CLI flags win.
    let defaults = Config::load_or_default(&args.repo_root.join(CONFIG_FILE_NAME));

    let Some(prefix) = args.prefix.or(defaults.generate.prefix) else {
        bail!(
            "no import prefix\n\
             hint: pass --prefix example.com/proj or set generate.prefix in gantry.toml"
        );
    };

    let build_name = args
        .build_name
        .or(defaults.generate.build_name)
        .unwrap_or_else(|| DEFAULT_BUILD_FILE_NAME.to_string());
    let gopath_layout = args.gopath_layout || defaults.generate.gopath_layout;

    let resolver = Box::new(VendoredResolver::new(prefix.clone(), gopath_layout));
    let config = GeneratorConfig::new(&args.repo_root, prefix, resolver)?
        .with_build_file_name(build_name)
        .with_build_tags(args.tags.into_iter().chain(defaults.generate.tags));

    let generator = Generator::new(config);

    let dirs = if args.dirs.is_empty() {
        vec![args.repo_root.clone()]
    } else {
        args.dirs
    };

    let mut written = 0usize;
    for dir in &dirs {
        let files = generator.generate(dir);
        match args.mode {
            Mode::Print => {
                for file in &files {
                    println!("# {}", file.output_path.display());
                    println!("{}", printer::render(file));
                }
            }
            Mode::Write => {
                printer::write_files(generator.config().repo_root(), &files)?;
                written += files.len();
            }
        }
    }

    if args.mode == Mode::Write {
        println!("wrote {} build files", written);
    }

    Ok(())
}
