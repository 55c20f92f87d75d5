// Write `catalog.html`: a color bar for every color map of the data
// directory, with its grey rendering below.

use std::{io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use color_catalog::{CatalogStore, ColorMap, ColorRange, RGBColor};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn color_bar(fh: &mut impl Write, cm: &ColorMap, n: usize) -> Result<(), Err> {
    let colors: Vec<RGB8> = cm.lut().range(0., 1., n).map(|(_, c)| c).collect();
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in &colors {
        writeln!(fh, "  <td style=\"width: 1px; height: 30px; \
                      background-color: {}\"></td>", css_string(c))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {} ({} samples)</td></tr><tr>",
             cm.pretty_name(), cm.len())?;
    for &c in &colors {
        writeln!(fh, "  <td style=\"width: 1px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(c.to_gray()))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let store = CatalogStore::load(color_catalog::default_data_dir())?;
    for e in store.skipped() {
        eprintln!("skipped: {e}");
    }
    let mut fh = BufWriter::new(File::create("catalog.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Color catalog</title>\n\
                  </head>\n\
                  <body>")?;
    for cat in store.list() {
        writeln!(fh, "<h3><a href=\"{}\">{}</a></h3>\n<p>{}</p>",
                 cat.url(), cat.name(), cat.license())?;
        for cm in cat.color_maps() {
            color_bar(&mut fh, cm, 256)?;
        }
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
