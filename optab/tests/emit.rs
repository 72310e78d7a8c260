mod common;

use optab::*;

const NOP_ONLY: &str = r#"{"unprefixed": {"0x00": {"mnemonic":"NOP","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"}}, "cbprefixed": {}}"#;

#[test]
fn nop_only_database() {
    let out = common::render_json(NOP_ONLY);
    assert_eq!(
        common::table_lines(&out, "ops"),
        [r#"{"NOP", 1, 0, "NONE", "NONE", 4, 0, {IGNORE, IGNORE, IGNORE, IGNORE}},"#]
    );
    assert!(common::table_lines(&out, "ops_cb").is_empty());
}

#[test]
fn nop_only_full_text() {
    let expected = "#include \"op_table.h\"\n\
                    #include \"instruction.h\"\n\
                    \n\
                    #include <vector>\n\
                    \n\
                    std::vector<Instruction> ops = {\n\
                    {\"NOP\", 1, 0, \"NONE\", \"NONE\", 4, 0, {IGNORE, IGNORE, IGNORE, IGNORE}},\n\
                    };\n\
                    std::vector<Instruction> ops_cb = {\n\
                    };\n";
    assert_eq!(common::render_json(NOP_ONLY), expected);
}

#[test]
fn branch_and_flag_line() {
    let out = common::render_json(
        r#"{"unprefixed": {"0x20": {"mnemonic":"JR","bytes":2,"operand_count":2,
            "operand1":"NZ","operand2":"r8","cycles":[8,12],"flags_ZHNC":"10-1"}},
            "cbprefixed": {}}"#,
    );
    assert_eq!(
        common::table_lines(&out, "ops"),
        [r#"{"JR", 2, 2, "NZ", "r8", 8, 12, {SET, CLEAR, IGNORE, SET}},"#]
    );
}

#[test]
fn sample_matches_golden_file() {
    let db = Database::load(&common::data_path("ops_sample.json")).unwrap();
    let expected = std::fs::read_to_string(common::data_path("op_table_sample.cpp")).unwrap();
    assert_eq!(render(&db).unwrap(), expected);
}

#[test]
fn yaml_sample_matches_golden_file() {
    let db = Database::load(&common::data_path("ops_sample.yaml")).unwrap();
    let expected = std::fs::read_to_string(common::data_path("op_table_sample.cpp")).unwrap();
    assert_eq!(render(&db).unwrap(), expected);
}

#[test]
fn rendering_is_deterministic() {
    let path = common::data_path("ops_sample.json");
    let first = render(&Database::load(&path).unwrap()).unwrap();
    for _ in 0..5 {
        assert_eq!(render(&Database::load(&path).unwrap()).unwrap(), first);
    }
}

#[test]
fn entries_follow_numeric_key_order() {
    // Lexical order of these keys differs from numeric order.
    let out = common::render_json(
        r#"{"unprefixed": {
            "0xA": {"mnemonic":"TEN","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"},
            "0x10": {"mnemonic":"SIXTEEN","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"},
            "0x9": {"mnemonic":"NINE","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"},
            "0x02": {"mnemonic":"TWO","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"}
        }, "cbprefixed": {}}"#,
    );
    let names: Vec<&str> = common::table_lines(&out, "ops")
        .iter()
        .map(|l| l.split('"').nth(1).unwrap())
        .collect();
    assert_eq!(names, ["TWO", "NINE", "TEN", "SIXTEEN"]);
}

#[test]
fn identical_entries_are_not_merged() {
    let out = common::render_json(
        r#"{"unprefixed": {}, "cbprefixed": {
            "0x40": {"mnemonic":"BIT","bytes":2,"operand_count":2,"cycles":[8],"flags_ZHNC":"Z01-"},
            "0x41": {"mnemonic":"BIT","bytes":2,"operand_count":2,"cycles":[8],"flags_ZHNC":"Z01-"}
        }}"#,
    );
    let lines = common::table_lines(&out, "ops_cb");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
}

#[test]
fn one_bad_record_fails_the_whole_render() {
    let db = Database::from_json_str(
        r#"{"unprefixed": {
            "0x00": {"mnemonic":"NOP","bytes":1,"operand_count":0,"cycles":[4],"flags_ZHNC":"----"}
        }, "cbprefixed": {
            "0x30": {"mnemonic":"SWAP","bytes":2,"operand_count":1,"cycles":[],"flags_ZHNC":"Z000"}
        }}"#,
    )
    .unwrap();
    let err = render(&db).unwrap_err();
    assert!(
        matches!(err, Error::EmptyCycleList { key } if key == OpcodeKey::new(0x30)),
        "got {err}"
    );
}

#[test]
fn table_keeps_keys_with_entries() {
    let db = Database::load(&common::data_path("ops_sample.json")).unwrap();
    let table = OpcodeTable::build(&db.prefixed).unwrap();
    assert_eq!(table.len(), 3);
    let entries: Vec<(u32, &str)> = table
        .iter()
        .map(|(key, insn)| (key.value(), insn.name.as_str()))
        .collect();
    assert_eq!(entries, [(0x00, "RLC"), (0x37, "SWAP"), (0x7C, "BIT")]);
}

#[test]
fn companion_header() {
    assert_eq!(
        render_header(),
        "#pragma once\n\
         \n\
         #include \"instruction.h\"\n\
         \n\
         #include <vector>\n\
         \n\
         extern std::vector<Instruction> ops;\n\
         extern std::vector<Instruction> ops_cb;\n"
    );
}
