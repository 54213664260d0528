use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lazy_static::lazy_static;
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};
use usvg::{fontdb, Options, Tree};

use crate::charts::series::{ChartKind, ChartSeries};
use crate::charts::svg::{render_single_figure, Figure};
use crate::config::constants::{COMBINED_FILE_NAME, METERS_PER_INCH, SVG_UNITS_PER_INCH};
use crate::utils::logging::{self, FileIOType, OperationCategory};

lazy_static! {
    // Loading system fonts is slow; share one database across exports
    static ref FONT_DATABASE: Arc<fontdb::Database> = {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    };
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse chart SVG: {0}")]
    Parse(#[from] usvg::Error),
    #[error("failed to allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn rasterize(figure: &Figure, dpi: u32) -> Result<Pixmap, ExportError> {
    let (width, height) = figure.pixel_size(dpi);

    let mut options = Options::default();
    options.fontdb = FONT_DATABASE.clone();
    let tree = Tree::from_data(figure.svg.as_bytes(), &options)?;

    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;
    let scale = dpi as f32 / SVG_UNITS_PER_INCH as f32;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn encode_png(pixmap: &Pixmap, dpi: u32) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let pixels_per_meter = (dpi as f64 / METERS_PER_INCH).round() as u32;
    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: pixels_per_meter,
            yppu: pixels_per_meter,
            unit: Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }

    Ok(out)
}

/// Rasterize a figure to PNG at the given resolution.
/// The figure has no outer padding, so the image is exactly size × dpi.
pub fn export_png(figure: &Figure, dpi: u32) -> Result<Vec<u8>, ExportError> {
    encode_png(&rasterize(figure, dpi)?, dpi)
}

/// Rasterize the side-by-side figure by tiling the single-chart rasters,
/// so every panel is pixel-identical to its individual export
pub fn export_combined_png(series: &[ChartSeries], dpi: u32) -> Result<Vec<u8>, ExportError> {
    let panels = series
        .iter()
        .map(|item| rasterize(&render_single_figure(item), dpi))
        .collect::<Result<Vec<_>, _>>()?;

    // Single figures share one size; an empty series fails allocation
    let (panel_width, height) = panels
        .first()
        .map(|panel| (panel.width(), panel.height()))
        .unwrap_or((0, 0));
    let width = panel_width * panels.len() as u32;
    let mut combined = Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;

    let row_bytes = panel_width as usize * 4;
    let stride = width as usize * 4;
    for (index, panel) in panels.iter().enumerate() {
        let offset = index * row_bytes;
        for (row, source) in panel.data().chunks_exact(row_bytes).enumerate() {
            let start = row * stride + offset;
            combined.data_mut()[start..start + row_bytes].copy_from_slice(source);
        }
    }

    encode_png(&combined, dpi)
}

fn write_png(path: PathBuf, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let _timing = logging::start_timing("write_png",
        OperationCategory::FileIO { subcategory: FileIOType::ChartSave });
    fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write `{prefix}.png` for a chart into `dir`
pub fn write_chart_png(
    dir: &Path,
    kind: ChartKind,
    figure: &Figure,
    dpi: u32,
) -> Result<PathBuf, ExportError> {
    let bytes = export_png(figure, dpi)?;
    write_png(dir.join(kind.file_name()), &bytes)
}

pub fn write_combined_png(dir: &Path, series: &[ChartSeries], dpi: u32) -> Result<PathBuf, ExportError> {
    let bytes = export_combined_png(series, dpi)?;
    write_png(dir.join(COMBINED_FILE_NAME), &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics_calculation::compute;
    use crate::charts::series::all_series;
    use crate::charts::svg::render_combined_figure;
    use crate::models::inputs::SimulationInputs;

    fn decode_rgba(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
        let mut reader = png::Decoder::new(bytes).read_info().expect("png header");
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).expect("png frame");
        buf.truncate(info.buffer_size());
        (info.width, info.height, buf)
    }

    #[test]
    fn png_carries_dpi_metadata() {
        let series = ChartSeries { kind: ChartKind::ValorizedWaste, baseline: 0.0, projection: 12.0 };
        let bytes = export_png(&render_single_figure(&series), 30).expect("export");

        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().expect("png header");
        let info = reader.info();
        assert_eq!((info.width, info.height), (240, 180));
        let dims = info.pixel_dims.expect("pHYs chunk");
        assert_eq!(dims.xppu, 1181);
        assert_eq!(dims.unit, Unit::Meter);
    }

    #[test]
    fn invalid_svg_is_reported() {
        let figure = Figure { width_in: 1.0, height_in: 1.0, svg: "<not-svg".to_string() };
        assert!(matches!(export_png(&figure, 10), Err(ExportError::Parse(_))));
    }

    #[test]
    fn combined_panels_match_single_exports_pixel_for_pixel() {
        let series = all_series(&compute(SimulationInputs::bounded(85.0, 0.65, 0.47, 1.8, 3300.0)));
        let dpi = 40;
        let (width, height, combined) = decode_rgba(&export_combined_png(&series, dpi).expect("combined"));
        assert_eq!((width, height), render_combined_figure(&series).pixel_size(dpi));

        let stride = width as usize * 4;
        for (index, item) in series.iter().enumerate() {
            let (panel_width, panel_height, single) =
                decode_rgba(&export_png(&render_single_figure(item), dpi).expect("single"));
            assert_eq!(panel_height, height);
            let row_bytes = panel_width as usize * 4;
            for row in 0..panel_height as usize {
                let start = row * stride + index * row_bytes;
                assert_eq!(
                    &combined[start..start + row_bytes],
                    &single[row * row_bytes..(row + 1) * row_bytes],
                    "panel {index} differs at row {row}"
                );
            }
        }
    }

    #[test]
    fn empty_combined_figure_is_an_allocation_error() {
        assert!(matches!(export_combined_png(&[], 10), Err(ExportError::Allocation { .. })));
    }

    #[test]
    fn combined_png_is_written_next_to_single_charts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let series = all_series(&compute(SimulationInputs::default()));
        let path = write_combined_png(dir.path(), &series, 20).expect("write");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(COMBINED_FILE_NAME));
        let (width, height, _) = decode_rgba(&fs::read(&path).expect("read"));
        assert_eq!((width, height), (480, 120));
    }
}
