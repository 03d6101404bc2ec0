use monalign::{SystemBackend, VScreen, backend::Backend, displays, primary_display};

fn main() -> monalign::Result<()> {
    let primary = primary_display()?;
    println!("Primary display: {primary:?}");

    let all = displays()?;
    println!("Displays ({})", all.len());
    for display in all {
        println!("  {display:?}");
    }

    let backend = SystemBackend;
    let (dx, dy) = backend.get_vscreen_normalize_offset()?;

    let vscreen = VScreen::load(backend)?;
    let (width, height) = vscreen.size()?;
    println!("Virtual screen: {width} x {height}, normalize offset ({dx}, {dy})");
    println!("Bounds: {:?}", vscreen.bounds());

    Ok(())
}
