// HTML layout of the dashboard page
use std::fmt::Write as _;

use crate::analysis::reporting::metric_cards;
use crate::branding::logos::BrandingOutcome;
use crate::charts::series::ChartKind;
use crate::charts::svg::Figure;
use crate::config::constants::VISUALIZER_VERSION;
use crate::config::parameters::{ValueDisplay, PARAMETERS};
use crate::models::inputs::SimulationInputs;
use crate::models::metrics::DerivedMetrics;

const PAGE_STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", system-ui, sans-serif; color: #0E454A; background: #FFFFFF; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 320px; padding: 24px; background: #F0F2F6; box-sizing: border-box; }
.sidebar label { display: block; margin-top: 18px; font-weight: 600; font-size: 14px; }
.sidebar input[type=range] { width: 100%; }
.sidebar .help { font-size: 12px; color: #555; }
.main { flex: 1; padding: 32px 48px; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 24px; }
.metric .label { font-size: 14px; font-weight: 700; }
.metric .value { font-size: 32px; margin: 4px 0; }
.metric .caption { font-size: 13px; color: #777; }
.chart svg { width: 100%; height: auto; }
.downloads a { display: inline-block; margin: 6px 12px 6px 0; padding: 8px 14px; border: 1px solid #0E454A; border-radius: 6px; color: #0E454A; text-decoration: none; }
.error { padding: 12px 16px; background: #FDECEA; color: #8A1C1C; border-radius: 6px; }
.center { text-align: center; }
.logos img { margin: 0 12px; }
.small { font-size: small; color: gray; }
"#;

// Keeps the value readout in sync while dragging; release submits the form
const PAGE_SCRIPT: &str = r#"
document.querySelectorAll('input[type=range]').forEach(function (input) {
  var out = document.getElementById(input.name + '_value');
  input.addEventListener('input', function () {
    var v = parseFloat(input.value);
    out.textContent = input.dataset.display === 'percent'
      ? (v * 100).toFixed(1) + '%'
      : v.toFixed(parseInt(input.dataset.decimals, 10));
  });
  input.addEventListener('change', function () { input.form.submit(); });
});
"#;

pub struct PageContext<'a> {
    pub inputs: &'a SimulationInputs,
    pub metrics: &'a DerivedMetrics,
    pub combined: &'a Figure,
    pub branding: &'a BrandingOutcome,
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_sidebar(html: &mut String, inputs: &SimulationInputs) {
    html.push_str("<aside class=\"sidebar\"><h2>Parámetros de Simulación</h2><form method=\"get\" action=\"/\">");
    for (spec, value) in PARAMETERS.iter().zip(inputs.values()) {
        let (display, decimals) = match spec.display {
            ValueDisplay::Integer => ("number", 0),
            ValueDisplay::Decimal(places) => ("number", places),
            ValueDisplay::Percent => ("percent", 1),
        };
        let _ = write!(
            html,
            "<label for=\"{key}\">{label} <span id=\"{key}_value\">{shown}</span></label>\
<input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" data-display=\"{display}\" data-decimals=\"{decimals}\" title=\"{help}\">\
<div class=\"help\">{help}</div>",
            key = spec.key,
            label = escape_html(spec.label),
            shown = escape_html(&spec.format_value(value)),
            min = spec.min,
            max = spec.max,
            step = spec.step,
            value = value,
            display = display,
            decimals = decimals,
            help = escape_html(spec.help),
        );
    }
    html.push_str("<noscript><button type=\"submit\">Actualizar</button></noscript></form><hr>");
    let _ = write!(
        html,
        "<div class=\"center small\">Versión del Visualizador: {}</div>",
        VISUALIZER_VERSION
    );
    html.push_str("</aside>");
}

fn render_metrics(html: &mut String, metrics: &DerivedMetrics) {
    html.push_str("<h2>Resultados Proyectados Anuales:</h2><section class=\"metrics\">");
    for card in metric_cards(metrics) {
        let _ = write!(
            html,
            "<div class=\"metric\"><div class=\"label\">{} {}</div><div class=\"value\">{}</div><div class=\"caption\">{}</div></div>",
            card.icon,
            escape_html(card.label),
            escape_html(&card.value),
            escape_html(card.caption)
        );
    }
    html.push_str("</section><hr>");
}

fn render_downloads(html: &mut String, inputs: &SimulationInputs) {
    html.push_str("<h3>Descargar Gráficos Individualmente</h3><div class=\"downloads\">");
    let query = inputs.to_query_string();
    for kind in ChartKind::ALL {
        let _ = write!(
            html,
            "<a href=\"/download/{file}?{query}\" download=\"{file}\">Descargar {file}</a>",
            file = kind.file_name(),
            query = escape_html(&query),
        );
    }
    html.push_str("</div><hr>");
}

fn render_branding(html: &mut String, branding: &BrandingOutcome) {
    html.push_str("<div class=\"center logos\">");
    match branding {
        BrandingOutcome::Loaded(logos) => {
            for logo in logos {
                let _ = write!(
                    html,
                    "<img src=\"{}\" width=\"{}\" alt=\"logo\">",
                    logo.data_uri(),
                    logo.width
                );
            }
        }
        BrandingOutcome::Failed(message) => {
            let _ = write!(html, "<div class=\"error\">{}</div>", escape_html(message));
        }
    }
    html.push_str("</div>");
}

/// Render the full dashboard for one pass
pub fn render_dashboard(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(ctx.combined.svg.len() + 16 * 1024);
    let _ = write!(
        html,
        "<!doctype html><html lang=\"es\"><head><meta charset=\"utf-8\">\
<title>Visualizador de Impactos - Proyecto P5</title><style>{}</style></head><body><div class=\"layout\">",
        PAGE_STYLE
    );

    render_sidebar(&mut html, ctx.inputs);

    html.push_str("<main class=\"main\">");
    html.push_str("<h1>✨ Visualizador de Impactos - Proyecto P5</h1>");
    html.push_str("<h3>Insect Based Food: Producción de proteína alternativa a partir de insectos</h3>");
    html.push_str(
        "<p>Ajusta los parámetros para explorar cómo las proyecciones de impacto ambiental y económico del proyecto \
varían con diferentes escenarios de volumen de residuos procesados, tasa de aprovechamiento, y factores de GEI.</p>",
    );

    render_metrics(&mut html, ctx.metrics);

    html.push_str("<h2>📊 Análisis Gráfico de Impactos</h2><div class=\"chart\">");
    html.push_str(&ctx.combined.svg);
    html.push_str("</div><hr>");

    render_downloads(&mut html, ctx.inputs);

    html.push_str("<h3>Información Adicional:</h3><ul><li><strong>Estado de Avance y Recomendaciones:</strong> \
El proyecto ha mostrado resultados positivos en la calidad nutricional del producto final y en la capacidad de la tecnología \
para transformar residuos orgánicos en biomasa proteica. Se requiere profundizar en la caracterización de los residuos \
valorizados y formalizar protocolos de recolección, higiene y manejo previo a la bioconversión.</li></ul><hr>");

    html.push_str("<div class=\"center\">Visualizador Creado por el equipo Sustrend SpA en el marco del Proyecto TT GREEN Foods</div><br><br>");
    render_branding(&mut html, ctx.branding);
    html.push_str("<div class=\"center small\">Viña del Mar, Valparaíso, Chile</div>");

    let _ = write!(html, "</main></div><script>{}</script></body></html>", PAGE_SCRIPT);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics_calculation::compute;
    use crate::charts::series::all_series;
    use crate::charts::svg::render_combined_figure;

    fn render(branding: BrandingOutcome) -> String {
        let inputs = SimulationInputs::default();
        let metrics = compute(inputs);
        let combined = render_combined_figure(&all_series(&metrics));
        render_dashboard(&PageContext {
            inputs: &inputs,
            metrics: &metrics,
            combined: &combined,
            branding: &branding,
        })
    }

    #[test]
    fn page_contains_metrics_charts_and_downloads() {
        let html = render(BrandingOutcome::Loaded(vec![]));
        assert!(html.contains("USD 24,000.00"));
        assert!(html.contains("12.00 ton/año"));
        assert!(html.contains("<svg"));
        for kind in ChartKind::ALL {
            assert!(html.contains(&format!("/download/{}?", kind.file_name())));
        }
        assert!(html.contains("name=\"recovery\""));
        assert!(html.contains("80.0%"));
    }

    #[test]
    fn branding_failure_is_shown_inline() {
        let html = render(BrandingOutcome::Failed("Error al cargar los logos <x>".to_string()));
        assert!(html.contains("class=\"error\">Error al cargar los logos &lt;x&gt;</div>"));
        assert!(html.contains("Viña del Mar, Valparaíso, Chile"));
        assert!(html.ends_with("</html>"));
    }
}
