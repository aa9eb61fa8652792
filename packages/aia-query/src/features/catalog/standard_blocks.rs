// Built-in App Inventor block vocabulary
//
// One row per block type: name, drawer, shape, legal mutator tags.
// Component blocks are generic over the component type; their specifics live
// in the mutation attributes of each instance.

use super::block_type::BlockCategory::{self, *};
use super::block_type::BlockKind::{self, Declaration as DECL, Mutation as MUT, Statement as STMT, Value as VAL};

type Row = (&'static str, BlockCategory, BlockKind, &'static [&'static str]);

const NONE: &[&str] = &[];
const ITEMS: &[&str] = &["item"];
const ARGS: &[&str] = &["arg"];
const LOCALS: &[&str] = &["localname"];

pub(crate) const STANDARD_BLOCKS: &[Row] = &[
    // Control
    ("controls_if", Control, STMT, &["elseif", "else"]),
    ("controls_forRange", Control, STMT, NONE),
    ("controls_forEach", Control, STMT, NONE),
    ("controls_for_each_dict", Control, STMT, NONE),
    ("controls_while", Control, STMT, NONE),
    ("controls_choose", Control, VAL, NONE),
    ("controls_do_then_return", Control, VAL, NONE),
    ("controls_eval_but_ignore", Control, STMT, NONE),
    ("controls_openAnotherScreen", Control, STMT, NONE),
    ("controls_openAnotherScreenWithStartValue", Control, STMT, NONE),
    ("controls_getStartValue", Control, VAL, NONE),
    ("controls_closeScreen", Control, STMT, NONE),
    ("controls_closeScreenWithValue", Control, STMT, NONE),
    ("controls_closeApplication", Control, STMT, NONE),
    ("controls_getPlainStartText", Control, VAL, NONE),
    ("controls_closeScreenWithPlainText", Control, STMT, NONE),
    ("controls_break", Control, STMT, NONE),
    // Logic
    ("logic_boolean", Logic, VAL, NONE),
    ("logic_false", Logic, VAL, NONE),
    ("logic_negate", Logic, VAL, NONE),
    ("logic_compare", Logic, VAL, NONE),
    ("logic_operation", Logic, VAL, ITEMS),
    ("logic_or", Logic, VAL, ITEMS),
    // Math
    ("math_number", Math, VAL, NONE),
    ("math_compare", Math, VAL, NONE),
    ("math_add", Math, VAL, ITEMS),
    ("math_subtract", Math, VAL, NONE),
    ("math_multiply", Math, VAL, ITEMS),
    ("math_division", Math, VAL, NONE),
    ("math_power", Math, VAL, NONE),
    ("math_bitwise", Math, VAL, ITEMS),
    ("math_random_int", Math, VAL, NONE),
    ("math_random_float", Math, VAL, NONE),
    ("math_random_set_seed", Math, STMT, NONE),
    ("math_on_list", Math, VAL, ITEMS),
    ("math_single", Math, VAL, NONE),
    ("math_abs", Math, VAL, NONE),
    ("math_neg", Math, VAL, NONE),
    ("math_round", Math, VAL, NONE),
    ("math_ceiling", Math, VAL, NONE),
    ("math_floor", Math, VAL, NONE),
    ("math_divide", Math, VAL, NONE),
    ("math_trig", Math, VAL, NONE),
    ("math_cos", Math, VAL, NONE),
    ("math_tan", Math, VAL, NONE),
    ("math_atan2", Math, VAL, NONE),
    ("math_convert_angles", Math, VAL, NONE),
    ("math_format_as_decimal", Math, VAL, NONE),
    ("math_is_a_number", Math, VAL, NONE),
    ("math_convert_number", Math, VAL, NONE),
    // Text
    ("text", Text, VAL, NONE),
    ("text_join", Text, VAL, ITEMS),
    ("text_length", Text, VAL, NONE),
    ("text_isEmpty", Text, VAL, NONE),
    ("text_compare", Text, VAL, NONE),
    ("text_trim", Text, VAL, NONE),
    ("text_changeCase", Text, VAL, NONE),
    ("text_starts_at", Text, VAL, NONE),
    ("text_contains", Text, VAL, NONE),
    ("text_split", Text, VAL, NONE),
    ("text_split_at_spaces", Text, VAL, NONE),
    ("text_segment", Text, VAL, NONE),
    ("text_replace_all", Text, VAL, NONE),
    ("obfuscated_text", Text, VAL, NONE),
    ("text_is_string", Text, VAL, NONE),
    // Lists
    ("lists_create_with", Lists, VAL, ITEMS),
    ("lists_create_with_item", Lists, VAL, NONE),
    ("lists_add_items", Lists, STMT, ITEMS),
    ("lists_is_in", Lists, VAL, NONE),
    ("lists_length", Lists, VAL, NONE),
    ("lists_is_empty", Lists, VAL, NONE),
    ("lists_pick_random_item", Lists, VAL, NONE),
    ("lists_position_in", Lists, VAL, NONE),
    ("lists_select_item", Lists, VAL, NONE),
    ("lists_insert_item", Lists, STMT, NONE),
    ("lists_replace_item", Lists, STMT, NONE),
    ("lists_remove_item", Lists, STMT, NONE),
    ("lists_append_list", Lists, STMT, NONE),
    ("lists_copy", Lists, VAL, NONE),
    ("lists_is_list", Lists, VAL, NONE),
    ("lists_to_csv_row", Lists, VAL, NONE),
    ("lists_to_csv_table", Lists, VAL, NONE),
    ("lists_from_csv_row", Lists, VAL, NONE),
    ("lists_from_csv_table", Lists, VAL, NONE),
    ("lists_lookup_in_pairs", Lists, VAL, NONE),
    ("lists_join_with_separator", Lists, VAL, NONE),
    // Dictionaries
    ("dictionaries_create_with", Dictionaries, VAL, ITEMS),
    ("pair", Dictionaries, VAL, NONE),
    ("dictionaries_lookup", Dictionaries, VAL, NONE),
    ("dictionaries_set_pair", Dictionaries, STMT, NONE),
    ("dictionaries_delete_pair", Dictionaries, STMT, NONE),
    ("dictionaries_recursive_lookup", Dictionaries, VAL, NONE),
    ("dictionaries_recursive_set", Dictionaries, STMT, NONE),
    ("dictionaries_getters", Dictionaries, VAL, NONE),
    ("dictionaries_get_values", Dictionaries, VAL, NONE),
    ("dictionaries_is_key_in", Dictionaries, VAL, NONE),
    ("dictionaries_length", Dictionaries, VAL, NONE),
    ("dictionaries_alist_to_dict", Dictionaries, VAL, NONE),
    ("dictionaries_dict_to_alist", Dictionaries, VAL, NONE),
    ("dictionaries_copy", Dictionaries, VAL, NONE),
    ("dictionaries_combine_dicts", Dictionaries, STMT, NONE),
    ("dictionaries_walk_tree", Dictionaries, VAL, NONE),
    ("dictionaries_walk_all", Dictionaries, VAL, NONE),
    ("dictionaries_is_dict", Dictionaries, VAL, NONE),
    // Colors
    ("color_black", Colors, VAL, NONE),
    ("color_white", Colors, VAL, NONE),
    ("color_red", Colors, VAL, NONE),
    ("color_pink", Colors, VAL, NONE),
    ("color_orange", Colors, VAL, NONE),
    ("color_yellow", Colors, VAL, NONE),
    ("color_green", Colors, VAL, NONE),
    ("color_cyan", Colors, VAL, NONE),
    ("color_blue", Colors, VAL, NONE),
    ("color_magenta", Colors, VAL, NONE),
    ("color_light_gray", Colors, VAL, NONE),
    ("color_gray", Colors, VAL, NONE),
    ("color_dark_gray", Colors, VAL, NONE),
    ("color_make_color", Colors, VAL, NONE),
    ("color_split_color", Colors, VAL, NONE),
    // Variables
    ("global_declaration", Variables, DECL, NONE),
    ("lexical_variable_get", Variables, VAL, NONE),
    ("lexical_variable_set", Variables, STMT, NONE),
    ("local_declaration_statement", Variables, STMT, LOCALS),
    ("local_declaration_expression", Variables, VAL, LOCALS),
    // Procedures
    ("procedures_defnoreturn", Procedures, DECL, ARGS),
    ("procedures_defreturn", Procedures, DECL, ARGS),
    ("procedures_callnoreturn", Procedures, STMT, ARGS),
    ("procedures_callreturn", Procedures, VAL, ARGS),
    // Components
    ("component_event", Components, DECL, NONE),
    ("component_method", Components, MUT, NONE),
    ("component_set_get", Components, MUT, NONE),
    ("component_component_block", Components, VAL, NONE),
];
