// Probe a file and print its descriptor without decoding pixels.

use anyhow::{bail, Context};
use jxlcoder::{is_recognized_container, probe, ContainerSignature};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: jxlinspect <file>")?;
    let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;

    if !is_recognized_container(&bytes) {
        bail!("{path}: not a recognized codestream or container");
    }

    let wrapping = match ContainerSignature::classify(&bytes) {
        Some(ContainerSignature::RawCodestream) => "raw codestream",
        Some(ContainerSignature::BoxedContainer) => "boxed container",
        None => unreachable!("sniffed above"),
    };

    let descriptor = probe(&bytes).with_context(|| format!("probing {path}"))?;

    println!("{path}: {wrapping}");
    println!("  size:      {}x{}", descriptor.width, descriptor.height);
    println!("  depth:     {}-bit", descriptor.bit_depth);
    println!(
        "  channels:  {} ({}alpha)",
        descriptor.channels.count(),
        if descriptor.has_alpha() { "" } else { "no " }
    );
    println!(
        "  color:     {:?} / {:?} / {:?}{}",
        descriptor.color.primaries,
        descriptor.color.transfer,
        descriptor.color.white_point,
        if descriptor.color.is_hdr() { " (HDR)" } else { "" }
    );
    if let Some(icc) = &descriptor.color.icc {
        println!("  icc:       {} bytes embedded", icc.len());
    }
    println!("  mode:      {:?}", descriptor.mode);

    Ok(())
}
