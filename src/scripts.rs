//! In-page JavaScript programs executed over the DevTools protocol.
//!
//! Centralising every script here serves two purposes:
//!
//! 1. **Single source of truth** — changing the DOM behaviour (e.g. how
//!    wrappers are resized) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the generated scripts
//!    directly without launching a browser, so a broken placeholder or a
//!    lost override is caught immediately.
//!
//! The layout script uses `__NAME__` placeholders instead of `format!`
//! because the JS bodies are full of braces.

use crate::config::RenderConfig;
use crate::geometry::PageGeometry;

/// Waits for every `<img>` in the document to settle.
///
/// An image counts as settled when it is already complete with a non-zero
/// natural width, or once it fires its load or error event. Error counts as
/// settled on purpose: a broken image should not stall the export forever.
///
/// Resolves to `{ total, awaited }` — how many images exist and how many
/// actually needed waiting on.
pub const IMAGE_WAIT: &str = r#"
(async () => {
  const images = Array.from(document.images || []);
  let awaited = 0;
  await Promise.all(images.map((img) => {
    if (img.complete && img.naturalWidth > 0) {
      return Promise.resolve();
    }
    awaited += 1;
    return new Promise((resolve) => {
      img.addEventListener("load", () => resolve(), { once: true });
      img.addEventListener("error", () => resolve(), { once: true });
    });
  }));
  return { total: images.length, awaited: awaited };
})()
"#;

/// Template for the diagram-layout pass. See [`layout_script`].
///
/// For every `img.<diagram-class>` it computes the scale mapping the natural
/// width onto the printable width, derives the scaled height, and decides
/// whether the image qualifies for full-page layout (explicit marker class,
/// or scaled height reaching the threshold fraction of the printable
/// height). The decision is then forced to true for every diagram — kept
/// exactly as the established rendering behaviour, since "fixing" it would
/// change the output of existing documents. The computed inputs are still
/// returned per diagram so callers can see what the decision would have been.
///
/// Full-page layout stretches the image, its marked wrapper (if any), and
/// its direct parent to the printable area, centering via flex alignment.
///
/// Returns one record per diagram image.
const LAYOUT_TEMPLATE: &str = r#"
(() => {
  const printableWidthPx = __PRINTABLE_WIDTH_PX__;
  const fullHeightPx = __PRINTABLE_HEIGHT_PX__;
  const thresholdRatio = __THRESHOLD_RATIO__;
  const records = [];
  const diagrams = document.querySelectorAll("img.__DIAGRAM_CLASS__");

  diagrams.forEach((img) => {
    const naturalWidth = img.naturalWidth || 0;
    const naturalHeight = img.naturalHeight || 0;
    const scale = naturalWidth > 0 ? (printableWidthPx / naturalWidth) : 1;
    const scaledHeight = naturalHeight * scale;
    const forcedByClass = img.classList.contains("__FULLPAGE_CLASS__");
    const exceedsThreshold = scaledHeight >= (fullHeightPx * thresholdRatio);
    let shouldFullpage = forcedByClass || exceedsThreshold;

    // TODO: confirm whether the unconditional promotion below is intended;
    // the size/marker decision above is computed but never honoured.
    shouldFullpage = true;
    let hasWrapper = false;
    if (shouldFullpage) {
      const wrapper = img.closest(".__WRAPPER_CLASS__");

      if (wrapper) {
        hasWrapper = true;
        wrapper.classList.add("__FULLPAGE_CLASS__-wrap");
        wrapper.style.height = `${fullHeightPx}px`;
        wrapper.style.minHeight = `${fullHeightPx}px`;
        wrapper.style.width = "100%";
        wrapper.style.display = "flex";
        wrapper.style.alignItems = "center";
        wrapper.style.justifyContent = "center";
      }

      img.classList.add("__FULLPAGE_CLASS__");
      img.style.width = "100%";
      img.style.height = "100%";
      img.style.objectFit = "contain";
      img.style.margin = "0 auto";

      const parent = img.parentElement;

      if (parent) {
        parent.style.height = "100%";
        parent.style.width = "100%";
        parent.style.margin = "0";
        parent.style.display = "flex";
        parent.style.alignItems = "center";
        parent.style.justifyContent = "center";
      }
    }

    records.push({
      natural_width: naturalWidth,
      natural_height: naturalHeight,
      scale: scale,
      scaled_height: scaledHeight,
      forced_by_class: forcedByClass,
      exceeds_threshold: exceedsThreshold,
      has_wrapper: hasWrapper,
      promoted: shouldFullpage
    });
  });

  return records;
})()
"#;

/// Build the diagram-layout script for the given geometry and configuration.
///
/// Class names are validated by the config builder to `[A-Za-z0-9_-]+`, so
/// plain substitution cannot break out of the selector strings.
pub fn layout_script(geometry: &PageGeometry, config: &RenderConfig) -> String {
    LAYOUT_TEMPLATE
        .replace(
            "__PRINTABLE_WIDTH_PX__",
            &format!("{}", geometry.printable_width_px),
        )
        .replace(
            "__PRINTABLE_HEIGHT_PX__",
            &format!("{}", geometry.printable_height_px),
        )
        .replace(
            "__THRESHOLD_RATIO__",
            &format!("{}", config.fullpage_threshold),
        )
        .replace("__DIAGRAM_CLASS__", &config.diagram_class)
        .replace("__FULLPAGE_CLASS__", &config.fullpage_class)
        .replace("__WRAPPER_CLASS__", &config.wrapper_class)
}
