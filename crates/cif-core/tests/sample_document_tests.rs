// Dweve CIF - Crystallographic Information File toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tests against the SD1601634 tsumcorite record.

use cif_core::{parse, CellVariant, CifErrorKind, ScalarValue};
use cif_test::fixtures::{self, NIGGLI, PUBLISHED, STANDARDIZED};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Document structure
// =============================================================================

#[test]
fn test_three_blocks_in_order() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let names: Vec<_> = doc.blocks().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec![PUBLISHED, STANDARDIZED, NIGGLI]);
    assert!(doc.warnings().is_empty());
    assert!(doc.skipped().is_empty());
}

#[test]
fn test_round_trip_is_byte_exact() {
    let text = fixtures::sd1601634();
    let doc = parse(text).unwrap();
    assert_eq!(doc.serialize(), text);
}

#[test]
fn test_cell_variants_describe_one_structure() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let variants: Vec<_> = doc.cell_variants().into_iter().map(|(v, _)| v).collect();
    assert_eq!(variants, CellVariant::ALL.to_vec());

    let published = doc.variant(CellVariant::Published).unwrap().cell();
    let niggli = doc.variant(CellVariant::NiggliReduced).unwrap().cell();
    // The reduced cell is primitive: half the C-centred volume.
    let ratio = published.volume.magnitude().unwrap() / niggli.volume.magnitude().unwrap();
    assert!((ratio - 2.0).abs() < 0.01);
}

#[test]
fn test_missing_block_is_block_not_found() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let err = doc.block("sm_isp_SD0000000-published_cell").unwrap_err();
    assert_eq!(err.kind, CifErrorKind::BlockNotFound);
}

// =============================================================================
// Published cell
// =============================================================================

#[test]
fn test_published_cell_length_a() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let a = doc.tag(PUBLISHED, "_cell_length_a").unwrap().unwrap();
    assert!(close(a.magnitude().unwrap(), 9.143));
    assert!(close(a.uncertainty().unwrap(), 0.002));
    assert_eq!(a.to_string(), "9.143(2)");
}

#[test]
fn test_published_angles_without_uncertainty() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let alpha = doc.tag(PUBLISHED, "_cell_angle_alpha").unwrap().unwrap();
    assert_eq!(alpha, &ScalarValue::known(90.0));
    assert_eq!(alpha.uncertainty(), None);
}

#[test]
fn test_published_wildcard_row_yields_no_sites() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(PUBLISHED).unwrap();
    let table = block.loop_with_prefix("_atom_site_").unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.rows()[0].is_all_unknown());
    assert!(block.atom_sites().is_empty());
    assert!(block.disorder_groups().is_empty());
}

#[test]
fn test_published_sentinels_stay_distinct() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(PUBLISHED).unwrap();
    assert!(block.tag("_cell_measurement_temperature").unwrap().is_unknown());
    assert!(block.tag("_refine_ls_R_factor_all").unwrap().is_not_applicable());
}

#[test]
fn test_published_text_fields_keep_markup() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(PUBLISHED).unwrap();
    let title = block.tag("_publ_section_title").unwrap();
    assert!(title.is_multiline());
    assert!(title
        .as_text()
        .unwrap()
        .starts_with("Tsumcorite, Pb(Zn,Fe)<sub>2</sub>(AsO<sub>4</sub>)"));
    assert_eq!(block.text_fields().count(), 2);
}

#[test]
fn test_published_author_loop_mixes_quotes_and_text() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let authors = doc
        .loop_table(PUBLISHED, "_publ_author")
        .unwrap()
        .unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors.value(0, "_publ_author_name").unwrap().as_text(), Some("Tillmanns E."));
    let address = authors.value(1, "_publ_author_address").unwrap();
    assert!(address.is_multiline());
    assert!(address.as_text().unwrap().ends_with("Heidelberg, Germany"));
}

#[test]
fn test_published_cell_parameters() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let cell = doc.block(PUBLISHED).unwrap().cell();
    assert_eq!(cell.space_group_name.as_text(), Some("C 1 2/m 1"));
    assert_eq!(cell.space_group_number.magnitude(), Some(12.0));
    assert_eq!(cell.formula_units_z.magnitude(), Some(2.0));
    let [ab, bc, ca] = cell.computed_ratios().unwrap();
    assert!((ab - cell.ratio_ab.magnitude().unwrap()).abs() < 1e-3);
    assert!((bc - cell.ratio_bc.magnitude().unwrap()).abs() < 1e-3);
    assert!((ca - cell.ratio_ca.magnitude().unwrap()).abs() < 1e-3);
}

// =============================================================================
// Standardized cell
// =============================================================================

#[test]
fn test_standardized_sites() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(STANDARDIZED).unwrap();
    assert_eq!(block.atom_sites().len(), 10);
    let pb1 = block
        .atom_sites()
        .iter()
        .find(|s| s.label() == "Pb1")
        .unwrap();
    assert_eq!(pb1.wyckoff_symbol().as_deref(), Some("2a"));
    assert_eq!(pb1.coordinates(), Some([0.0, 0.0, 0.0]));
    assert!(pb1.coordination_number.is_unknown());
    assert!(pb1.environment_type.is_unknown());
}

#[test]
fn test_standardized_disorder_groups() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(STANDARDIZED).unwrap();

    let disordered: Vec<_> = block
        .disorder_groups()
        .iter()
        .filter(|g| g.is_disordered())
        .collect();
    assert_eq!(disordered.len(), 2);

    let oh = disordered[0];
    assert_eq!(oh.wyckoff().as_deref(), Some("4i"));
    assert_eq!(oh.labels(), vec!["OH2", "OH"]);
    let occupancies: Vec<_> = oh.members().iter().map(|s| s.occupancy_value().unwrap()).collect();
    assert_eq!(occupancies, vec![0.655, 0.345]);
    assert!(close(oh.total_occupancy(), 1.0));
    assert_eq!(oh.annotation(), None);

    let m1 = disordered[1];
    assert_eq!(m1.wyckoff().as_deref(), Some("4f"));
    let species: Vec<_> = m1.members().iter().map(|s| s.species.to_string()).collect();
    assert_eq!(species, vec!["Zn", "Fe", "Pb"]);
    assert!(close(m1.total_occupancy(), 1.0));
    assert_eq!(m1.annotation(), Some("M1 Zn0.645Fe0.345Pb0.010"));
}

#[test]
fn test_standardized_singletons() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(STANDARDIZED).unwrap();
    let singletons: Vec<_> = block
        .disorder_groups()
        .iter()
        .filter(|g| !g.is_disordered())
        .flat_map(|g| g.labels())
        .collect();
    assert_eq!(singletons, vec!["O1", "O2", "As1", "O3", "Pb1"]);
}

#[test]
fn test_group_occupancies_within_bound() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    for block in doc.blocks() {
        for group in block.disorder_groups().iter().filter(|g| g.is_disordered()) {
            assert!(group.total_occupancy() <= 1.0 + 1e-6);
        }
    }
}

#[test]
fn test_rows_keep_source_order() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let table = doc
        .loop_table(STANDARDIZED, "_atom_site_")
        .unwrap()
        .unwrap();
    let labels: Vec<_> = table
        .column("_atom_site_label")
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        labels,
        vec!["O1", "O2", "As1", "O3", "OH2", "OH", "Pb1", "Zn1", "Fe1", "Pb2"]
    );
    assert_eq!(table.rows()[7].comment(), Some("M1 Zn0.645Fe0.345Pb0.010"));
}

// =============================================================================
// Niggli-reduced cell
// =============================================================================

#[test]
fn test_niggli_block() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let block = doc.block(NIGGLI).unwrap();
    assert_eq!(block.cell_variant(), Some(CellVariant::NiggliReduced));
    assert!(block.atom_sites().is_empty());
    assert_eq!(block.comments().map(str::trim).collect::<Vec<_>>(), vec![
        "Niggli-reduced crystallographic data",
        "End of data set 1601634",
    ]);
    let transformation = block.tag("_sm_cell_transformation").unwrap();
    assert!(transformation.as_text().unwrap().contains("a<sub>N</sub>"));
}
