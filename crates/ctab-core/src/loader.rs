use ndarray::{ArrayD, ArrayView2, Ix2};
use tracing::{debug, info, info_span};

use ctab_ingest::{DataSource, SourceData, read_source};
use ctab_model::{ContingencyTable, DataForm, Dimension, LoadOptions, Result, TableError};

use crate::convert::{case_form_to_table, frequency_form_to_table, table_form_to_table};
use crate::resolve::resolve_categories;

/// Load observations from any supported source into a contingency table.
///
/// Files and frames are read first; when `options.named` is set and no
/// variable list was given, the header row (or frame column names) supplies
/// it. Category labels are resolved with `options.category_map` and the
/// result is coerced to numbers before dispatching on `form`.
///
/// # Errors
///
/// Fails with the first error encountered; no partial table is returned.
/// A table whose counts sum past `u64::MAX` is rejected with
/// [`TableError::CountOverflow`].
pub fn load_data(
    source: DataSource,
    form: DataForm,
    dimension: &Dimension,
    options: &LoadOptions,
) -> Result<ContingencyTable> {
    let span = info_span!("load_data", form = %form, source = source.kind());
    let _guard = span.enter();

    let values: ArrayD<f64> = match read_source(source, options)? {
        SourceData::Table(raw) => {
            let var_list = options.var_list.as_deref().or(raw.headers.as_deref());
            debug!(
                rows = raw.grid.n_rows(),
                cols = raw.grid.n_cols(),
                named = var_list.is_some(),
                "read raw observations"
            );
            resolve_categories(
                &raw.grid,
                options.category_map.as_ref(),
                var_list,
                form,
            )?
            .into_dyn()
        }
        SourceData::Array(values) => values,
    };

    let table = match form {
        DataForm::CaseForm => {
            case_form_to_table(two_dimensional(&values, "case form")?, dimension)?
        }
        DataForm::FrequencyForm => {
            frequency_form_to_table(two_dimensional(&values, "frequency form")?, dimension)?
        }
        DataForm::TableForm => table_form_to_table(values.view(), dimension)?,
    };
    let total = table.total()?;
    info!(total, shape = ?table.shape(), "loaded contingency table");
    Ok(table)
}

fn two_dimensional<'a>(
    values: &'a ArrayD<f64>,
    context: &'static str,
) -> Result<ArrayView2<'a, f64>> {
    values
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| TableError::ShapeMismatch {
            context,
            actual: values.shape().to_vec(),
            expected: "a 2-D array of (observations, variables)".to_string(),
        })
}
